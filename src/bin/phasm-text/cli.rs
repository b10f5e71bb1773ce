// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use phasm_text::{CodecError, CodingMethod, TreeConfig};

#[derive(Parser)]
#[command(name = "phasm-text", about = "Hide data in plain-looking sentences", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a raw text into a one-sentence-per-line corpus
    Normalize {
        /// Raw input text
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Hide a message in covertext
    Encode {
        /// Normalized corpus file
        corpus: PathBuf,

        /// Message to hide: a file path if it exists, otherwise the literal text
        message: String,

        #[command(flatten)]
        tree: TreeArgs,

        /// Seed for reproducible output (random by default)
        #[arg(long)]
        seed: Option<u64>,

        /// Encrypt the message with this passphrase
        #[arg(long, short = 'p', conflicts_with = "raw")]
        passphrase: Option<String>,

        /// Encode the bytes as-is, without length/CRC framing
        #[arg(long)]
        raw: bool,

        /// Output file (defaults to stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Recover a message from covertext
    Decode {
        /// Normalized corpus file (must match the one used to encode)
        corpus: PathBuf,

        /// Covertext file, byte-exact: adding or removing a final newline
        /// changes the decoded bits
        covertext: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,

        /// Passphrase for encrypted messages
        #[arg(long, short = 'p', conflicts_with = "raw")]
        passphrase: Option<String>,

        /// Covertext was produced with --raw
        #[arg(long)]
        raw: bool,

        /// Output file (defaults to stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Report tree shape and, optionally, encoding expansion for a message
    Stats {
        /// Normalized corpus file
        corpus: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,

        /// Message to measure: a file path if it exists, otherwise the literal text
        #[arg(long)]
        message: Option<String>,
    },
}

#[derive(Args)]
pub struct TreeArgs {
    /// n-gram window size (at least 2)
    #[arg(long, short = 'd', default_value_t = 2)]
    pub depth: usize,

    /// Code assignment method; fixed often fails
    #[arg(long, short = 'm', value_enum, default_value_t = MethodArg::Adaptive)]
    pub method: MethodArg,
}

impl TreeArgs {
    pub fn config(&self) -> Result<TreeConfig, CodecError> {
        TreeConfig::new(self.depth, self.method.into())
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    #[value(alias = "huffman")]
    Adaptive,
    #[value(alias = "binary")]
    Fixed,
}

impl From<MethodArg> for CodingMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Adaptive => CodingMethod::Adaptive,
            MethodArg::Fixed => CodingMethod::Fixed,
        }
    }
}
