// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! A single node of the context tree.

use std::collections::HashMap;

use super::code::Code;

/// One node of the context tree: a token label, the number of times the path
/// ending here was observed, the code assigned by the finalize pass, and the
/// observed continuations.
///
/// Each node exclusively owns its children. Sibling labels are unique; the
/// `index` map mirrors `children` and is rebuilt whenever they are reordered.
#[derive(Debug, Clone)]
pub struct ContextNode {
    token: String,
    count: u64,
    code: Code,
    children: Vec<ContextNode>,
    index: HashMap<String, usize>,
}

impl ContextNode {
    pub(crate) fn new(token: &str) -> Self {
        Self {
            token: token.to_owned(),
            count: 0,
            code: Code::empty(),
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Number of observations of the path ending at this node.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Assigned code (empty when this node was never coded).
    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn children(&self) -> &[ContextNode] {
        &self.children
    }

    /// A node with exactly one child selects it without spending bits.
    pub fn is_trivial(&self) -> bool {
        self.children.len() == 1
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a direct child by label.
    pub fn child(&self, token: &str) -> Option<&ContextNode> {
        self.index.get(token).map(|&i| &self.children[i])
    }

    /// Follow `path` from this node, one label per level.
    pub fn walk<'a, I>(&self, path: I) -> Option<&ContextNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for token in path {
            node = node.child(token)?;
        }
        Some(node)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ContextNode::node_count).sum::<usize>()
    }

    /// Length of the longest path below this node (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Count one observation of this node and of `path` below it.
    pub(crate) fn observe<S: AsRef<str>>(&mut self, path: &[S]) {
        self.count += 1;
        let Some((head, rest)) = path.split_first() else {
            return;
        };
        let head = head.as_ref();
        let i = match self.index.get(head) {
            Some(&i) => i,
            None => {
                self.children.push(ContextNode::new(head));
                self.index.insert(head.to_owned(), self.children.len() - 1);
                self.children.len() - 1
            }
        };
        self.children[i].observe(rest);
    }

    pub(crate) fn set_code(&mut self, code: Code) {
        self.code = code;
    }

    pub(crate) fn children_mut(&mut self) -> &mut [ContextNode] {
        &mut self.children
    }

    /// Reorder children by rank: descending count, then ascending label.
    ///
    /// Makes every finalize pass independent of insertion order.
    pub(crate) fn rank_children(&mut self) {
        self.children
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        self.reindex();
    }

    /// Keep only the first `n` children (by current order).
    pub(crate) fn truncate_children(&mut self, n: usize) {
        self.children.truncate(n);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, c) in self.children.iter().enumerate() {
            self.index.insert(c.token.clone(), i);
        }
    }
}
