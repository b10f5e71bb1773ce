// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sealed messages on top of the raw codec.
//!
//! [`hide`] / [`reveal`] add what the bare transcoder lacks: byte-exact
//! recovery (length + CRC frame), Brotli compression to shorten the
//! covertext, and optional AES-256-GCM-SIV encryption keyed by an Argon2id
//! passphrase derivation.

pub mod crypto;
pub mod error;
pub mod frame;
pub mod payload;
mod pipeline;

pub use error::StegoError;
pub use pipeline::{hide, reveal};
