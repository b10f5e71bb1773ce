// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for context-tree construction and transcoding.

use core::fmt;

/// Errors that can occur while building a context tree or while encoding or
/// decoding a covertext against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The configured context depth is below the minimum of 2.
    InvalidDepth { depth: usize },
    /// An observed path is longer than the tree depth.
    PathTooLong { len: usize, depth: usize },
    /// A corpus sentence contains one of the reserved sentinel tokens.
    ReservedToken(String),
    /// No child code at the current node is a prefix of the padded bit buffer.
    NoMatchingSymbol {
        context: Vec<String>,
        bit_position: usize,
    },
    /// A covertext token is not a continuation of its context in the tree.
    UnknownToken {
        context: Vec<String>,
        token: String,
        line: usize,
    },
    /// The encoder reached a context that is not present in the tree.
    ContextNotFound { context: Vec<String> },
    /// A full sentence was produced without consuming any payload bit.
    NoCapacity,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDepth { depth } => {
                write!(f, "invalid context depth {depth} (minimum is 2)")
            }
            Self::PathTooLong { len, depth } => {
                write!(f, "observed path of {len} tokens exceeds tree depth {depth}")
            }
            Self::ReservedToken(t) => write!(f, "corpus contains reserved token {t:?}"),
            Self::NoMatchingSymbol {
                context,
                bit_position,
            } => write!(
                f,
                "no child code matches the payload at bit {bit_position} (context: {})",
                context.join(" ")
            ),
            Self::UnknownToken {
                context,
                token,
                line,
            } => write!(
                f,
                "line {line}: token {token:?} does not follow context \"{}\" in the tree",
                context.join(" ")
            ),
            Self::ContextNotFound { context } => {
                write!(f, "context \"{}\" is not present in the tree", context.join(" "))
            }
            Self::NoCapacity => write!(f, "tree has no branching reachable from the sentence start"),
        }
    }
}

impl std::error::Error for CodecError {}

pub type Result<T> = std::result::Result<T, CodecError>;
