//! # Node Set
//!
//! Dense arena of active nodes with swap-remove.
//!
//! Removing a node moves the last entry into its slot, so indices are not
//! stable across removals. The `signer -> index` and `url -> index` maps are
//! rewritten for the moved entry on every swap.

use super::Node;
use shared_types::Address;
use std::collections::HashMap;

/// Active nodes, indexed by position, signer and url.
#[derive(Clone, Debug, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    by_signer: HashMap<Address, usize>,
    by_url: HashMap<String, usize>,
}

impl NodeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Current index of `signer`'s node.
    pub fn index_of_signer(&self, signer: &Address) -> Option<usize> {
        self.by_signer.get(signer).copied()
    }

    /// Current index of the node using `url`.
    pub fn index_of_url(&self, url: &str) -> Option<usize> {
        self.by_url.get(url).copied()
    }

    /// Node registered for `signer`.
    pub fn by_signer(&self, signer: &Address) -> Option<&Node> {
        self.index_of_signer(signer).and_then(|i| self.nodes.get(i))
    }

    /// Node registered under `url`.
    pub fn by_url(&self, url: &str) -> Option<&Node> {
        self.index_of_url(url).and_then(|i| self.nodes.get(i))
    }

    /// Whether an active node uses `url`.
    pub fn contains_url(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    /// Iterate over active nodes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Append `node`; returns its index.
    ///
    /// Callers check url and signer uniqueness first.
    pub fn insert(&mut self, node: Node) -> usize {
        let index = self.nodes.len();
        self.by_signer.insert(node.signer, index);
        self.by_url.insert(node.url.clone(), index);
        self.nodes.push(node);
        index
    }

    /// Replace the node of `node.signer` in place; returns the old value.
    pub fn replace(&mut self, node: Node) -> Option<Node> {
        let index = self.index_of_signer(&node.signer)?;
        let new_url = node.url.clone();
        let old = std::mem::replace(&mut self.nodes[index], node);
        if old.url != new_url {
            self.by_url.remove(&old.url);
            self.by_url.insert(new_url, index);
        }
        Some(old)
    }

    /// Remove `signer`'s node, moving the last node into its slot.
    pub fn swap_remove(&mut self, signer: &Address) -> Option<Node> {
        let index = self.by_signer.remove(signer)?;
        let removed = self.nodes.swap_remove(index);
        self.by_url.remove(&removed.url);

        if let Some(moved) = self.nodes.get(index) {
            self.by_signer.insert(moved.signer, index);
            self.by_url.insert(moved.url.clone(), index);
        }
        Some(removed)
    }
}
