// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Command-line front end: normalize corpora, hide and reveal messages.

mod cli;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use cli::{Cli, Commands, TreeArgs};
use phasm_text::corpus;
use phasm_text::{Codebook, TreeStats};

fn init_tracing(cli: &Cli) {
    // --quiet: off. --verbose: RUST_LOG, else info. Default: warnings only.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Normalize { input, output } => {
            let text = read_text(&input)?;
            let lines = corpus::normalize_corpus(&text);
            tracing::info!(sentences = lines.len(), "corpus normalized");
            let mut out = lines.join("\n");
            out.push('\n');
            write_output(output.as_deref(), out.as_bytes())
        }

        Commands::Encode {
            corpus,
            message,
            tree,
            seed,
            passphrase,
            raw,
            output,
        } => {
            let book = load_codebook(&corpus, &tree)?;
            let message = read_message(&message)?;
            let mut rng = match seed {
                Some(s) => ChaCha20Rng::seed_from_u64(s),
                None => ChaCha20Rng::from_entropy(),
            };

            let covertext = if raw {
                phasm_text::encode(&book, &message, &mut rng)?
            } else {
                phasm_text::hide(&book, &message, passphrase.as_deref(), &mut rng)?
            };
            tracing::info!(
                message_bytes = message.len(),
                words = covertext.split_whitespace().count(),
                "message encoded"
            );
            write_output(output.as_deref(), covertext.as_bytes())
        }

        Commands::Decode {
            corpus,
            covertext,
            tree,
            passphrase,
            raw,
            output,
        } => {
            let book = load_codebook(&corpus, &tree)?;
            let text = read_text(&covertext)?;
            let message = if raw {
                phasm_text::decode(&book, &text)?
            } else {
                phasm_text::reveal(&book, &text, passphrase.as_deref())?
            };
            tracing::info!(message_bytes = message.len(), "message decoded");
            write_output(output.as_deref(), &message)
        }

        Commands::Stats {
            corpus,
            tree,
            message,
        } => {
            let book = load_codebook(&corpus, &tree)?;
            let stats = TreeStats::collect(&book);

            println!("children\tnodes");
            for (k, n) in &stats.branching {
                println!("{k}\t{n}");
            }
            println!("total nodes:     {}", stats.total_nodes);
            println!("n-grams (leaves): {}", stats.leaves);
            println!("trivial nodes:   {}", stats.trivial);
            println!("longest code:    {} bits", stats.max_code_len);
            println!("encoding power:  {:.2} %", 100.0 * stats.encoding_power());

            if let Some(m) = message {
                let message = read_message(&m)?;
                let covertext = phasm_text::encode_with_seed(&book, &message, 0)?;
                let words = covertext.split_whitespace().count();
                println!("message:         {} bytes / {} bits", message.len(), 8 * message.len());
                println!("covertext:       {} chars / {words} words", covertext.len());
                println!(
                    "words per bit:   {:.4}",
                    phasm_text::words_per_bit(words, message.len())
                );
            }
            Ok(())
        }
    }
}

fn load_codebook(path: &Path, tree: &TreeArgs) -> Result<Codebook> {
    let config = tree.config()?;
    let text = read_text(path)?;
    let book = Codebook::from_corpus(&text, &config)
        .with_context(|| format!("building context tree from {}", path.display()))?;
    tracing::info!(
        depth = config.depth,
        method = %config.method,
        nodes = book.root().node_count(),
        "codebook ready"
    );
    Ok(book)
}

/// A message argument is a file path if one exists, otherwise literal text.
fn read_message(arg: &str) -> Result<Vec<u8>> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        tracing::info!(path = %path.display(), "reading message from file");
        fs::read(&path).with_context(|| format!("reading {}", path.display()))
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write(p, bytes).with_context(|| format!("writing {}", p.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
