// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Corpus normalization.
//!
//! Turns raw text into one sentence per line: lower case, punctuation
//! replaced by spaces, whitespace collapsed. Lines that look like links or
//! are too short to be real sentences are dropped. The output is what
//! [`Codebook::from_corpus`](crate::model::Codebook::from_corpus) expects.

/// Characters replaced by a space before tokenization.
pub const STRIPPED_CHARS: &str = "\"&#'}{()[]-|è`_\\^@=$£%µ*!:.;,?/↑";

/// Lines shorter than this (in characters, after stripping) are dropped.
pub const MIN_LINE_CHARS: usize = 30;

/// Normalize one raw line, or `None` if the line should be dropped.
pub fn normalize_line(line: &str) -> Option<String> {
    let lowered = line.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if STRIPPED_CHARS.contains(c) { ' ' } else { c })
        .collect();

    if stripped.contains("http") || stripped.contains("www") {
        return None;
    }
    if stripped.chars().count() < MIN_LINE_CHARS {
        return None;
    }
    Some(stripped.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Normalize a whole text, keeping only accepted lines.
pub fn normalize_corpus(text: &str) -> Vec<String> {
    let lines: Vec<String> = text.lines().filter_map(normalize_line).collect();
    tracing::debug!(
        input_lines = text.lines().count(),
        kept = lines.len(),
        "corpus normalized"
    );
    lines
}

/// Whitespace tokens of every non-blank line.
pub fn sentences(corpus: &str) -> impl Iterator<Item = Vec<&str>> {
    corpus
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let out = normalize_line("Hello, World! This (really) is a \"test\" sentence.").unwrap();
        assert_eq!(out, "hello world this really is a test sentence");
    }

    #[test]
    fn drops_short_lines() {
        assert_eq!(normalize_line("Too short."), None);
        assert_eq!(normalize_line(""), None);
    }

    #[test]
    fn drops_links() {
        assert_eq!(
            normalize_line("See https://example.org for the full story of it"),
            None
        );
        assert_eq!(
            normalize_line("Visit www example org for the full story of it all"),
            None
        );
    }

    #[test]
    fn collapses_whitespace() {
        let out = normalize_line("a   lot\tof    spaces   between   these  words").unwrap();
        assert_eq!(out, "a lot of spaces between these words");
    }

    #[test]
    fn corpus_keeps_order() {
        let text = "The first line is long enough to be kept.\nshort\n\
                    The second line is also long enough to keep.";
        let out = normalize_corpus(text);
        assert_eq!(
            out,
            [
                "the first line is long enough to be kept",
                "the second line is also long enough to keep"
            ]
        );
    }

    #[test]
    fn sentences_skip_blank_lines() {
        let s: Vec<_> = sentences("a b\n\n  \nc\n").collect();
        assert_eq!(s, vec![vec!["a", "b"], vec!["c"]]);
    }
}
