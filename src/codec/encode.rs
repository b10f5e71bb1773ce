// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Payload -> covertext.
//!
//! The encoder walks the codebook from the current context and, at every
//! step, picks the child whose code matches the next payload bits:
//!
//! 1. A single-child node emits its child and spends no bits.
//! 2. Otherwise the remaining bits are extended by virtual zeros and every
//!    child whose code is a prefix of that buffer is a candidate.
//!    Exactly one candidate consumes its code's length in real bits; several
//!    candidates (uncoded children) are resolved by the caller's RNG without
//!    consuming bits; none is an error.
//! 3. END closes the sentence and resets the context to START.
//!
//! Every sentence closed by END is written with a trailing `\n`. A final
//! sentence cut off when the payload runs out has no terminator. The decoder
//! uses that distinction to account for END's code bits.
//!
//! Walks that spend no bits are bounded: a sentence closed without consuming
//! a bit and without a random choice fails at once, and
//! [`MAX_IDLE_SENTENCES`] such sentences in a row fail even when they were
//! random. Either way the tree cannot carry the payload.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::bits::BitReader;
use super::context::ContextWindow;
use super::error::{CodecError, Result};
use crate::model::{Codebook, ContextNode, END_TOKEN};

/// Consecutive END-closed sentences that consumed no bit before encoding
/// gives up with [`CodecError::NoCapacity`].
pub const MAX_IDLE_SENTENCES: usize = 64;

/// Encode `payload` into covertext using `rng` for ambiguous choices.
///
/// # Errors
/// - [`CodecError::NoMatchingSymbol`] if no child code fits the payload.
/// - [`CodecError::ContextNotFound`] if the context walks out of the tree
///   (only possible after fixed-method pruning).
/// - [`CodecError::NoCapacity`] if sentences stop consuming bits: one
///   deterministic sentence without bits, or [`MAX_IDLE_SENTENCES`] in a row
///   whose only choices were random (uncoded fixed-method subtrees).
pub fn encode<R: Rng + ?Sized>(book: &Codebook, payload: &[u8], rng: &mut R) -> Result<String> {
    let mut bits = BitReader::new(payload);
    let mut context = ContextWindow::new(book.depth() - 1);
    let mut covertext = String::new();
    let mut sentence: Vec<&str> = Vec::new();

    let mut sentences = 0usize;
    let mut words = 0usize;
    let mut sentence_start_bit = 0usize;
    let mut sentence_random = false;
    let mut idle_sentences = 0usize;

    while !bits.is_empty() {
        let node = book
            .node(context.iter())
            .ok_or_else(|| CodecError::ContextNotFound {
                context: context.to_vec(),
            })?;

        let chosen = match select_child(node, &bits) {
            Selection::Only(child) => child,
            Selection::Coded(child) => {
                bits.skip(child.code().len());
                child
            }
            Selection::Ambiguous(candidates) => {
                let i = rng.gen_range(0..candidates.len());
                tracing::trace!(
                    candidates = candidates.len(),
                    picked = candidates[i].token(),
                    bit = bits.position(),
                    "ambiguous code prefix resolved at random"
                );
                sentence_random = true;
                candidates[i]
            }
            Selection::None => {
                return Err(CodecError::NoMatchingSymbol {
                    context: context.to_vec(),
                    bit_position: bits.position(),
                })
            }
        };

        if chosen.token() == END_TOKEN {
            if bits.position() == sentence_start_bit {
                idle_sentences += 1;
                if !sentence_random || idle_sentences >= MAX_IDLE_SENTENCES {
                    tracing::debug!(
                        idle_sentences,
                        bit = bits.position(),
                        "sentences consume no payload bits"
                    );
                    return Err(CodecError::NoCapacity);
                }
            } else {
                idle_sentences = 0;
            }
            covertext.push_str(&sentence.join(" "));
            covertext.push('\n');
            sentence.clear();
            context.reset();
            sentences += 1;
            sentence_start_bit = bits.position();
            sentence_random = false;
        } else {
            sentence.push(chosen.token());
            context.push(chosen.token());
            words += 1;
        }
    }

    if !sentence.is_empty() {
        covertext.push_str(&sentence.join(" "));
        sentences += 1;
    }

    tracing::debug!(
        payload_bits = bits.total_bits(),
        words,
        sentences,
        "payload encoded"
    );
    Ok(covertext)
}

/// Encode with a ChaCha20 RNG seeded from `seed`; fully reproducible.
pub fn encode_with_seed(book: &Codebook, payload: &[u8], seed: u64) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    encode(book, payload, &mut rng)
}

enum Selection<'t> {
    /// Single-child node: no bits spent.
    Only(&'t ContextNode),
    /// Exactly one code matched.
    Coded(&'t ContextNode),
    Ambiguous(Vec<&'t ContextNode>),
    None,
}

fn select_child<'t>(node: &'t ContextNode, bits: &BitReader<'_>) -> Selection<'t> {
    if let [only] = node.children() {
        return Selection::Only(only);
    }
    let mut candidates: Vec<&ContextNode> = node
        .children()
        .iter()
        .filter(|c| bits.matches_padded(c.code()))
        .collect();
    match candidates.len() {
        0 => Selection::None,
        1 => Selection::Coded(candidates.remove(0)),
        _ => Selection::Ambiguous(candidates),
    }
}
