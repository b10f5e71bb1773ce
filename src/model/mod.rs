// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! The n-gram context tree: construction, code assignment, and statistics.
//!
//! The finished [`Codebook`] is the secret shared by encoder and decoder.
//! Both must build it from the same corpus with the same depth and method;
//! any mismatch produces garbage rather than a detected error.

pub mod code;
pub mod node;
pub mod prefix;
pub mod stats;
pub mod tree;

pub use code::Code;
pub use node::ContextNode;
pub use prefix::{prefix_codes, PrefixCodeBuilder};
pub use stats::TreeStats;
pub use tree::{
    Codebook, CodingMethod, ContextTree, TreeConfig, END_TOKEN, MIN_DEPTH, ROOT_TOKEN, START_TOKEN,
};
