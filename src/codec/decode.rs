// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Covertext -> payload.
//!
//! Each line is one sentence. The context restarts at START for every line,
//! so lines decode independently; with the `parallel` feature they are
//! processed on the rayon pool and concatenated in order.
//!
//! For every token the decoder walks the full window (up to `depth` tokens,
//! including the token itself) and appends the code found there. A node
//! whose parent has a single child contributes no bits. Lines terminated by
//! `\n` were closed by END on the encoder side, so END's code is appended
//! after their last token. Blank lines are skipped. Trailing bits that do not
//! fill a byte are dropped.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::bits::BitWriter;
use super::context::ContextWindow;
use super::error::{CodecError, Result};
use crate::model::{Codebook, END_TOKEN};

/// Recover the payload bytes carried by `covertext`.
///
/// The covertext must be passed byte-exact. A final line without `\n` is a
/// sentence cut off when the payload ran out; adding a newline to it makes
/// the decoder count an END that was never encoded, which either appends
/// bits the encoder did not consume or fails with
/// [`CodecError::UnknownToken`] for END. Stripping the newline from an
/// END-closed last sentence drops END's bits the same way.
///
/// Raw decoding is exact up to the last byte. When the final code reaches
/// past the payload into the encoder's zero padding, extra `0x00` bytes may
/// follow the payload; sealed messages carry their length for that reason.
///
/// # Errors
/// [`CodecError::UnknownToken`] if a token (or a sentence end) does not
/// follow its context in the codebook. Expected when decoding against the
/// fixed method, which prunes continuations a message may still use.
pub fn decode(book: &Codebook, covertext: &str) -> Result<Vec<u8>> {
    let lines: Vec<(usize, &str)> = covertext.split_inclusive('\n').enumerate().collect();

    #[cfg(feature = "parallel")]
    let per_line: Vec<Vec<bool>> = lines
        .par_iter()
        .map(|&(i, line)| sentence_bits(book, i + 1, line))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let per_line: Vec<Vec<bool>> = lines
        .iter()
        .map(|&(i, line)| sentence_bits(book, i + 1, line))
        .collect::<Result<_>>()?;

    let mut writer = BitWriter::new();
    for bits in &per_line {
        writer.extend_bits(bits);
    }
    let bit_len = writer.bit_len();
    let payload = writer.into_bytes();

    tracing::debug!(
        lines = lines.len(),
        bits = bit_len,
        bytes = payload.len(),
        dropped_bits = bit_len % 8,
        "covertext decoded"
    );
    Ok(payload)
}

/// Code bits carried by one line (1-based `line_no` for diagnostics).
fn sentence_bits(book: &Codebook, line_no: usize, line: &str) -> Result<Vec<bool>> {
    let terminated = line.ends_with('\n');
    let mut bits = Vec::new();
    let mut tokens = line.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Ok(bits);
    }

    let mut context = ContextWindow::new(book.depth());
    for token in tokens {
        bits.extend_from_slice(code_for(book, &mut context, token, line_no)?);
    }
    if terminated {
        bits.extend_from_slice(code_for(book, &mut context, END_TOKEN, line_no)?);
    }
    Ok(bits)
}

/// Push `token` into the window and return its code bits under the
/// preceding context. Single-child parents yield no bits.
fn code_for<'b, 'l>(
    book: &'b Codebook,
    context: &mut ContextWindow<'l>,
    token: &'l str,
    line_no: usize,
) -> Result<&'b [bool]> {
    context.push(token);
    let path: Vec<&str> = context.iter().collect();
    let parent_path = &path[..path.len() - 1];

    let found = book
        .node(parent_path.iter().copied())
        .and_then(|parent| Some((parent, parent.child(token)?)));
    let Some((parent, node)) = found else {
        return Err(CodecError::UnknownToken {
            context: parent_path.iter().map(|t| (*t).to_owned()).collect(),
            token: token.to_owned(),
            line: line_no,
        });
    };

    if parent.is_trivial() {
        Ok(&[])
    } else {
        Ok(node.code().bits())
    }
}
