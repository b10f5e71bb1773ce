// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Transcoding between payload bytes and covertext.
//!
//! Both directions borrow a finished [`Codebook`](crate::model::Codebook)
//! immutably, so any number of encodes and decodes may share one codebook
//! across threads. The only nondeterminism is the encoder's tie-break
//! between uncoded siblings, which draws from the caller's RNG.

pub mod bits;
pub mod context;
pub mod decode;
pub mod encode;
pub mod error;

pub use decode::decode;
pub use encode::{encode, encode_with_seed};
pub use error::CodecError;
