// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-text
//!
//! Linguistic steganography: hide arbitrary bytes in ordinary-looking
//! sentences, using an n-gram context tree learned from a corpus as the
//! codebook shared by sender and receiver.
//!
//! - [`model`]: context tree construction and code assignment (adaptive
//!   prefix codes or fixed-width power-of-two codes).
//! - [`codec`]: the encode/decode transcoder between payload bits and words.
//! - [`stego`]: sealed messages (framing, compression, optional encryption).
//! - [`corpus`]: corpus normalization.
//!
//! # Quick start
//!
//! ```rust
//! use phasm_text::{decode, encode_with_seed, Codebook, TreeConfig};
//!
//! let corpus = "the cat sat\nthe cat ran\n";
//! let book = Codebook::from_corpus(corpus, &TreeConfig::default()).unwrap();
//! let covertext = encode_with_seed(&book, &[0x5A], 42).unwrap();
//! assert_eq!(decode(&book, &covertext).unwrap(), vec![0x5A]);
//! ```

pub mod codec;
pub mod corpus;
pub mod model;
pub mod stego;

pub use codec::{decode, encode, encode_with_seed, CodecError};
pub use model::stats::words_per_bit;
pub use model::{
    Code, Codebook, CodingMethod, ContextNode, ContextTree, PrefixCodeBuilder, TreeConfig,
    TreeStats, END_TOKEN, START_TOKEN,
};
pub use stego::{hide, reveal, StegoError};
