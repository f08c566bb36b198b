//! Visible node set derived from the expansion state.
//!
//! A node is visible iff it is the root or its parent is expanded. The traversal is breadth-first
//! from the root and only descends into children that are themselves expanded: opening a node
//! reveals its direct children, never its grandchildren.

use crate::document::NodeId;
use crate::expansion::ExpandedSet;
use crate::graph::GraphModel;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNode {
    pub id: NodeId,
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Visibility {
    order: Vec<VisibleNode>,
    index: FxHashMap<NodeId, usize>,
}

impl Visibility {
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn depth(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|&i| self.order[i].depth)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible nodes in discovery order; depths never decrease along the sequence.
    pub fn nodes(&self) -> &[VisibleNode] {
        &self.order
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter().map(|n| &n.id)
    }

    fn push(&mut self, id: NodeId, depth: usize) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.order.len());
        self.order.push(VisibleNode { id, depth });
        true
    }
}

pub fn compute_visibility(graph: &GraphModel, expanded: &ExpandedSet) -> Visibility {
    let mut visibility = Visibility::default();
    let Some(root) = graph.root() else {
        return visibility;
    };

    visibility.push(root.clone(), 0);
    let mut queue: VecDeque<(&NodeId, usize)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((id, depth)) = queue.pop_front() {
        if !expanded.contains(id.as_str()) {
            continue;
        }
        for child in graph.children(id.as_str()) {
            // The guard only matters for malformed input; a valid tree reaches each node once.
            if visibility.push(child.clone(), depth + 1) && expanded.contains(child.as_str()) {
                queue.push_back((child, depth + 1));
            }
        }
    }

    visibility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;

    fn graph() -> GraphModel {
        GraphModel::build([
            Node::new("root", "Root", None),
            Node::new("a", "A", Some("root")),
            Node::new("b", "B", Some("root")),
            Node::new("a1", "A1", Some("a")),
            Node::new("a1x", "A1x", Some("a1")),
        ])
    }

    fn ids(v: &Visibility) -> Vec<&str> {
        v.ids().map(NodeId::as_str).collect()
    }

    #[test]
    fn root_is_visible_with_empty_expansion() {
        let g = graph();
        let v = compute_visibility(&g, &ExpandedSet::default());
        assert_eq!(ids(&v), vec!["root"]);
        assert_eq!(v.depth("root"), Some(0));
    }

    #[test]
    fn expanding_reveals_direct_children_only() {
        let g = graph();
        let v = compute_visibility(&g, &ExpandedSet::with_root(g.root()));
        assert_eq!(ids(&v), vec!["root", "a", "b"]);
        assert_eq!(v.depth("a"), Some(1));
        assert!(!v.contains("a1"));
    }

    #[test]
    fn expanded_descendant_under_collapsed_parent_stays_hidden() {
        let g = graph();
        let expanded = ExpandedSet::from_ids(["root".into(), "a1".into()]);
        let v = compute_visibility(&g, &expanded);
        assert_eq!(ids(&v), vec!["root", "a", "b"]);
    }

    #[test]
    fn depths_follow_the_traversal() {
        let g = graph();
        let expanded = ExpandedSet::from_ids(["root".into(), "a".into(), "a1".into()]);
        let v = compute_visibility(&g, &expanded);
        assert_eq!(ids(&v), vec!["root", "a", "b", "a1", "a1x"]);
        assert_eq!(v.depth("a1x"), Some(3));
    }

    #[test]
    fn empty_graph_has_nothing_visible() {
        let g = GraphModel::default();
        let v = compute_visibility(&g, &ExpandedSet::default());
        assert!(v.is_empty());
    }
}
