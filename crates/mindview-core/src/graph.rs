//! Arena of nodes keyed by id plus a derived parent -> children index.
//!
//! Nodes never own their children; every relation is resolved through id lookups so that the
//! expansion state and the derived view can be recomputed from scratch at any time.

use crate::document::{Node, NodeId};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: IndexMap<NodeId, Node>,
    children: FxHashMap<NodeId, Vec<NodeId>>,
    top_level: Vec<NodeId>,
    root: Option<NodeId>,
}

impl GraphModel {
    /// Builds the children index in one pass, preserving input order among siblings.
    ///
    /// The root is the first node without a parent. When no such node exists the first node of
    /// the list is promoted to root and its parent reference is dropped, so that it cannot end up
    /// as its own descendant. Later occurrences of an already-seen id are skipped; ingestion is
    /// responsible for reporting them.
    pub fn build(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut arena: IndexMap<NodeId, Node> = IndexMap::new();
        for node in nodes {
            if arena.contains_key(&node.id) {
                continue;
            }
            arena.insert(node.id.clone(), node);
        }

        let root = arena
            .values()
            .find(|n| n.parent_id.is_none())
            .or_else(|| arena.first().map(|(_, n)| n))
            .map(|n| n.id.clone());
        if let Some(root) = &root {
            if let Some(node) = arena.get_mut(root) {
                node.parent_id = None;
            }
        }

        let mut children: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        let mut top_level = Vec::new();
        for node in arena.values() {
            match &node.parent_id {
                Some(parent) => children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.id.clone()),
                None => top_level.push(node.id.clone()),
            }
        }

        Self {
            nodes: arena,
            children,
            top_level,
            root,
        }
    }

    pub fn root(&self) -> Option<&NodeId> {
        self.root.as_ref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Direct children of `parent`, or the parentless nodes when `parent` is `None`.
    pub fn children_of(&self, parent: Option<&str>) -> &[NodeId] {
        match parent {
            Some(parent) => self.children(parent),
            None => &self.top_level,
        }
    }

    pub fn children(&self, id: &str) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_children(&self, id: &str) -> bool {
        !self.children(id).is_empty()
    }

    pub fn parent(&self, id: &str) -> Option<&NodeId> {
        self.nodes.get(id)?.parent_id.as_ref()
    }

    /// Every node below `id`, found with an explicit stack rather than recursion.
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(id);
        let mut stack: Vec<&NodeId> = self.children(id).iter().rev().collect();
        while let Some(next) = stack.pop() {
            if !seen.insert(next.as_str()) {
                continue;
            }
            out.push(next.clone());
            stack.extend(self.children(next.as_str()).iter().rev());
        }
        out
    }

    /// Ancestors of `id`, nearest first. Stops at the first repeated id on malformed parent chains.
    pub fn ancestors(&self, id: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        seen.insert(id);
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if !seen.insert(parent.as_str()) {
                break;
            }
            out.push(parent.clone());
            current = self.parent(parent.as_str());
        }
        out
    }

    /// Ids reachable from the root by following the children index.
    pub fn reachable_from_root(&self) -> FxHashSet<NodeId> {
        let mut reachable = FxHashSet::default();
        let Some(root) = &self.root else {
            return reachable;
        };
        reachable.insert(root.clone());
        reachable.extend(self.descendants(root.as_str()));
        reachable
    }
}
