// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Context tree construction and code assignment.
//!
//! A [`ContextTree`] is built by observing sliding n-gram windows of corpus
//! sentences. Finalizing it consumes the builder and yields a read-only
//! [`Codebook`] in which every branching node's children carry codes:
//!
//! - **Adaptive**: prefix codes from [`PrefixCodeBuilder`](super::prefix::PrefixCodeBuilder),
//!   all children kept. Always decodable.
//! - **Fixed**: `floor(log2(k))`-bit codes for the `2^floor(log2(k))`
//!   best-ranked children; the rest are pruned. A node with a single child
//!   stops the pass, so deeper branching below it stays uncoded. This method
//!   fails often and is never the default.
//!
//! Coding starts at the children of the root. The root's own children are
//! context anchors that the encoder never selects, so they are neither coded
//! nor pruned.

use core::fmt;
use core::str::FromStr;

use super::code::Code;
use super::node::ContextNode;
use super::prefix::prefix_codes;
use crate::codec::error::{CodecError, Result};

/// Reserved token that anchors the context at the start of every sentence.
pub const START_TOKEN: &str = "<s>";
/// Reserved token that terminates a sentence.
pub const END_TOKEN: &str = "</s>";
/// Label of the root node. Never matched against covertext.
pub const ROOT_TOKEN: &str = "ROOT";
/// Smallest usable n-gram window.
pub const MIN_DEPTH: usize = 2;

/// Code assignment algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CodingMethod {
    /// Minimal-redundancy prefix codes over all children.
    #[default]
    Adaptive,
    /// Fixed-width power-of-two codes with pruning.
    Fixed,
}

impl fmt::Display for CodingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adaptive => f.write_str("adaptive"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

impl FromStr for CodingMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adaptive" | "huffman" => Ok(Self::Adaptive),
            "fixed" | "binary" => Ok(Self::Fixed),
            other => Err(format!("unknown coding method {other:?} (expected adaptive or fixed)")),
        }
    }
}

/// Parameters shared by encoder and decoder. Both sides must use the same
/// values and the same corpus; the tree is the shared codebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// n-gram window size, counting both endpoints.
    pub depth: usize,
    pub method: CodingMethod,
}

impl TreeConfig {
    pub fn new(depth: usize, method: CodingMethod) -> Result<Self> {
        validate_depth(depth)?;
        Ok(Self { depth, method })
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: MIN_DEPTH,
            method: CodingMethod::Adaptive,
        }
    }
}

fn validate_depth(depth: usize) -> Result<()> {
    if depth < MIN_DEPTH {
        return Err(CodecError::InvalidDepth { depth });
    }
    Ok(())
}

/// Construction-phase context tree.
#[derive(Debug, Clone)]
pub struct ContextTree {
    root: ContextNode,
    depth: usize,
}

impl ContextTree {
    /// Create an empty tree.
    ///
    /// # Errors
    /// [`CodecError::InvalidDepth`] if `depth < 2`.
    pub fn new(depth: usize) -> Result<Self> {
        validate_depth(depth)?;
        Ok(Self {
            root: ContextNode::new(ROOT_TOKEN),
            depth,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &ContextNode {
        &self.root
    }

    /// Count one observation of `path` (at most `depth` tokens).
    pub fn observe<S: AsRef<str>>(&mut self, path: &[S]) -> Result<()> {
        if path.len() > self.depth {
            return Err(CodecError::PathTooLong {
                len: path.len(),
                depth: self.depth,
            });
        }
        self.root.observe(path);
        Ok(())
    }

    /// Observe every window of one whitespace-tokenized sentence.
    ///
    /// The sentence is framed as `START tokens.. END` and one window of up to
    /// `depth` tokens is observed at each position except the last, so END
    /// never opens a window. Empty sentences are ignored.
    ///
    /// # Errors
    /// [`CodecError::ReservedToken`] if the sentence contains a sentinel.
    pub fn observe_sentence<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<()> {
        if tokens.is_empty() {
            return Ok(());
        }
        if let Some(t) = tokens
            .iter()
            .map(AsRef::as_ref)
            .find(|t| *t == START_TOKEN || *t == END_TOKEN || *t == ROOT_TOKEN)
        {
            return Err(CodecError::ReservedToken(t.to_owned()));
        }

        let mut seq: Vec<&str> = Vec::with_capacity(tokens.len() + 2);
        seq.push(START_TOKEN);
        seq.extend(tokens.iter().map(AsRef::as_ref));
        seq.push(END_TOKEN);

        for window in sentence_windows(&seq, self.depth) {
            self.root.observe(window);
        }
        Ok(())
    }

    /// Finalize with the given method.
    pub fn finalize(self, method: CodingMethod) -> Codebook {
        match method {
            CodingMethod::Adaptive => self.assign_adaptive_codes(),
            CodingMethod::Fixed => self.assign_fixed_codes(),
        }
    }

    /// Assign prefix codes to the children of every branching node.
    pub fn assign_adaptive_codes(mut self) -> Codebook {
        let mut summary = FinalizeSummary::default();
        self.root.rank_children();
        for anchor in self.root.children_mut() {
            assign_adaptive(anchor, &mut summary);
        }
        self.into_codebook(CodingMethod::Adaptive, summary)
    }

    /// Assign fixed-width codes, pruning each branching node to a power of two.
    pub fn assign_fixed_codes(mut self) -> Codebook {
        let mut summary = FinalizeSummary::default();
        self.root.rank_children();
        for anchor in self.root.children_mut() {
            assign_fixed(anchor, &mut summary);
        }
        self.into_codebook(CodingMethod::Fixed, summary)
    }

    fn into_codebook(self, method: CodingMethod, summary: FinalizeSummary) -> Codebook {
        tracing::debug!(
            %method,
            depth = self.depth,
            nodes = self.root.node_count(),
            coded_nodes = summary.coded_nodes,
            pruned_children = summary.pruned_children,
            "context tree finalized"
        );
        Codebook {
            root: self.root,
            depth: self.depth,
            method,
        }
    }
}

/// Sliding windows `seq[i..min(i + depth, len)]` for `i` in `0..len - 1`.
pub(crate) fn sentence_windows<'s, T>(seq: &'s [T], depth: usize) -> impl Iterator<Item = &'s [T]> {
    (0..seq.len().saturating_sub(1)).map(move |i| &seq[i..(i + depth).min(seq.len())])
}

#[derive(Default)]
struct FinalizeSummary {
    coded_nodes: usize,
    pruned_children: usize,
}

fn assign_adaptive(node: &mut ContextNode, summary: &mut FinalizeSummary) {
    node.rank_children();
    if node.children().len() >= 2 {
        let counts: Vec<u64> = node.children().iter().map(ContextNode::count).collect();
        for (child, code) in node.children_mut().iter_mut().zip(prefix_codes(&counts)) {
            child.set_code(code);
        }
        summary.coded_nodes += 1;
    }
    for child in node.children_mut() {
        assign_adaptive(child, summary);
    }
}

fn assign_fixed(node: &mut ContextNode, summary: &mut FinalizeSummary) {
    let k = node.children().len();
    // Also skips the subtree: descendants of a single-child node stay uncoded.
    if k <= 1 {
        return;
    }
    node.rank_children();
    let width = k.ilog2();
    let keep = 1usize << width;
    node.truncate_children(keep);
    summary.pruned_children += k - keep;
    summary.coded_nodes += 1;

    for (rank, child) in node.children_mut().iter_mut().enumerate() {
        child.set_code(Code::fixed_width(rank, width));
    }
    for child in node.children_mut() {
        assign_fixed(child, summary);
    }
}

/// Finished, read-only context tree shared by encoder and decoder.
#[derive(Debug, Clone)]
pub struct Codebook {
    root: ContextNode,
    depth: usize,
    method: CodingMethod,
}

impl Codebook {
    /// Build and finalize a tree from a corpus with one sentence per line.
    ///
    /// Lines are split on whitespace; blank lines are skipped. The corpus is
    /// expected to be normalized already (see [`crate::corpus`]).
    pub fn from_corpus(corpus: &str, config: &TreeConfig) -> Result<Self> {
        let mut tree = ContextTree::new(config.depth)?;
        let mut sentences = 0usize;
        for tokens in crate::corpus::sentences(corpus) {
            tree.observe_sentence(&tokens)?;
            sentences += 1;
        }
        tracing::debug!(sentences, depth = config.depth, "corpus observed");
        Ok(tree.finalize(config.method))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn method(&self) -> CodingMethod {
        self.method
    }

    pub fn root(&self) -> &ContextNode {
        &self.root
    }

    /// Node reached by following `path` from the root.
    pub fn node<'a, I>(&self, path: I) -> Option<&ContextNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.root.walk(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(sentences: &[&str], depth: usize) -> ContextTree {
        let mut tree = ContextTree::new(depth).unwrap();
        for s in sentences {
            let tokens: Vec<&str> = s.split_whitespace().collect();
            tree.observe_sentence(&tokens).unwrap();
        }
        tree
    }

    fn code_at(book: &Codebook, path: &[&str]) -> String {
        book.node(path.iter().copied()).unwrap().code().to_string()
    }

    #[test]
    fn depth_below_two_rejected() {
        assert!(matches!(ContextTree::new(1), Err(CodecError::InvalidDepth { depth: 1 })));
        assert!(matches!(ContextTree::new(0), Err(CodecError::InvalidDepth { depth: 0 })));
        assert!(TreeConfig::new(1, CodingMethod::Adaptive).is_err());
        assert!(ContextTree::new(2).is_ok());
    }

    #[test]
    fn observe_rejects_long_path() {
        let mut tree = ContextTree::new(2).unwrap();
        assert!(tree.observe(&["a", "b"]).is_ok());
        assert!(matches!(
            tree.observe(&["a", "b", "c"]),
            Err(CodecError::PathTooLong { len: 3, depth: 2 })
        ));
    }

    #[test]
    fn reserved_tokens_rejected() {
        let mut tree = ContextTree::new(2).unwrap();
        assert!(matches!(
            tree.observe_sentence(&["hello", END_TOKEN]),
            Err(CodecError::ReservedToken(_))
        ));
    }

    #[test]
    fn windows_match_sliding_ngram() {
        let seq = ["<s>", "a", "b", "</s>"];
        let w: Vec<_> = sentence_windows(&seq, 3).collect();
        assert_eq!(w, vec![&seq[0..3], &seq[1..4], &seq[2..4]]);
        let w2: Vec<_> = sentence_windows(&seq, 2).collect();
        assert_eq!(w2.len(), 3);
        assert!(w2.iter().all(|w| w.len() == 2));
    }

    #[test]
    fn cat_scenario_adaptive() {
        let book = tree_from(&["the cat sat", "the cat ran"], 2).assign_adaptive_codes();

        let the = book.node([START_TOKEN]).unwrap();
        assert!(the.is_trivial());
        assert_eq!(the.children()[0].token(), "the");
        assert_eq!(the.children()[0].count(), 2);
        assert_eq!(code_at(&book, &[START_TOKEN, "the"]), "");

        let the_node = book.node(["the"]).unwrap();
        assert!(the_node.is_trivial());
        assert_eq!(code_at(&book, &["the", "cat"]), "");

        let cat = book.node(["cat"]).unwrap();
        assert_eq!(cat.children().len(), 2);
        // Equal counts: rank puts "ran" first, the lowest-index group gets a 1.
        assert_eq!(code_at(&book, &["cat", "ran"]), "1");
        assert_eq!(code_at(&book, &["cat", "sat"]), "0");

        assert!(book.node(["sat"]).unwrap().is_trivial());
        assert_eq!(book.node(["sat"]).unwrap().children()[0].token(), END_TOKEN);
    }

    #[test]
    fn root_children_are_not_coded() {
        let book = tree_from(&["a b", "b a", "a a"], 2).assign_adaptive_codes();
        assert!(book.root().children().len() >= 2);
        assert!(book.root().children().iter().all(|c| c.code().is_empty()));
    }

    #[test]
    fn adaptive_recurses_below_trivial_nodes() {
        // "x" has the single continuation "y"; "y" branches at depth 3.
        let book = tree_from(&["x y p", "x y q"], 3).assign_adaptive_codes();
        let y = book.node(["x", "y"]).unwrap();
        assert_eq!(y.children().len(), 2);
        assert!(y.children().iter().all(|c| c.code().len() == 1));
    }

    #[test]
    fn fixed_keeps_power_of_two() {
        let book = tree_from(&["a b", "a c", "a d", "a d", "a e", "a e", "a e"], 2)
            .assign_fixed_codes();
        let a = book.node(["a"]).unwrap();
        // k = 4: every child kept, 2-bit codes in rank order.
        assert_eq!(a.children().len(), 4);
        assert!(a.children().iter().all(|c| c.code().len() == 2));
        assert_eq!(code_at(&book, &["a", "e"]), "00");
        assert_eq!(code_at(&book, &["a", "d"]), "01");
        assert_eq!(code_at(&book, &["a", "b"]), "10");
        assert_eq!(code_at(&book, &["a", "c"]), "11");
    }

    #[test]
    fn fixed_prunes_lowest_ranked() {
        let book = tree_from(&["a b", "a b", "a c", "a c", "a d"], 2).assign_fixed_codes();
        let a = book.node(["a"]).unwrap();
        assert_eq!(a.children().len(), 2);
        assert_eq!(code_at(&book, &["a", "b"]), "0");
        assert_eq!(code_at(&book, &["a", "c"]), "1");
        assert!(a.child("d").is_none());
    }

    #[test]
    fn fixed_leaves_descendants_of_single_child_uncoded() {
        let book = tree_from(&["x y p", "x y q"], 3).assign_fixed_codes();
        let y = book.node(["x", "y"]).unwrap();
        assert_eq!(y.children().len(), 2);
        assert!(y.children().iter().all(|c| c.code().is_empty()));

        // Same tree, adaptive: coded.
        let adaptive = tree_from(&["x y p", "x y q"], 3).assign_adaptive_codes();
        assert!(adaptive
            .node(["x", "y"])
            .unwrap()
            .children()
            .iter()
            .all(|c| c.code().len() == 1));
    }

    #[test]
    fn finalize_independent_of_insertion_order() {
        let a = tree_from(&["a b", "a c", "a c", "a d", "b a"], 2).assign_adaptive_codes();
        let b = tree_from(&["b a", "a d", "a c", "a c", "a b"], 2).assign_adaptive_codes();
        for tok in ["b", "c", "d"] {
            assert_eq!(code_at(&a, &["a", tok]), code_at(&b, &["a", tok]));
        }
    }

    #[test]
    fn method_parsing() {
        assert_eq!("Huffman".parse::<CodingMethod>().unwrap(), CodingMethod::Adaptive);
        assert_eq!("binary".parse::<CodingMethod>().unwrap(), CodingMethod::Fixed);
        assert_eq!(CodingMethod::Fixed.to_string(), "fixed");
        assert!("lzw".parse::<CodingMethod>().is_err());
    }
}
