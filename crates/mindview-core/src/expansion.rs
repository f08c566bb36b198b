//! Expansion state: the set of node ids whose direct children are eligible for display.
//!
//! Collapsing a node forgets the expansion state of its whole subtree, so re-expanding it
//! always starts with its children collapsed.

use crate::document::NodeId;
use crate::graph::GraphModel;
use indexmap::IndexSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Expanded,
    /// `forgotten` counts descendants whose expansion state was discarded.
    Collapsed {
        forgotten: usize,
    },
    /// Leaf or unknown node; the set was not touched.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    ids: IndexSet<NodeId>,
}

impl ExpandedSet {
    /// The state right after a document is loaded: only the root is open.
    pub fn with_root(root: Option<&NodeId>) -> Self {
        let mut ids = IndexSet::new();
        if let Some(root) = root {
            ids.insert(root.clone());
        }
        Self { ids }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in the order they were expanded.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    pub fn reset(&mut self, root: Option<&NodeId>) {
        *self = Self::with_root(root);
    }

    pub fn toggle(&mut self, graph: &GraphModel, id: &str) -> ToggleOutcome {
        if self.ids.contains(id) {
            let descendants = graph.descendants(id);
            let mut forgotten = 0;
            for descendant in &descendants {
                if self.ids.shift_remove(descendant) {
                    forgotten += 1;
                }
            }
            self.ids.shift_remove(id);
            tracing::debug!(%id, forgotten, "collapsed node");
            return ToggleOutcome::Collapsed { forgotten };
        }

        let Some(node) = graph.node(id) else {
            tracing::warn!(%id, "toggle on unknown node ignored");
            return ToggleOutcome::Ignored;
        };
        if !graph.has_children(id) {
            return ToggleOutcome::Ignored;
        }
        self.ids.insert(node.id.clone());
        tracing::debug!(%id, "expanded node");
        ToggleOutcome::Expanded
    }

    /// Opens every node that has children.
    pub fn expand_all(&mut self, graph: &GraphModel) {
        for node in graph.nodes() {
            if graph.has_children(node.id.as_str()) {
                self.ids.insert(node.id.clone());
            }
        }
    }

    pub fn collapse_all(&mut self, graph: &GraphModel) {
        self.reset(graph.root());
    }

    /// Expands every ancestor of `id` so that it becomes visible. Returns `false` for unknown ids.
    pub fn reveal(&mut self, graph: &GraphModel, id: &str) -> bool {
        if !graph.contains(id) {
            tracing::warn!(%id, "reveal on unknown node ignored");
            return false;
        }
        let mut ancestors = graph.ancestors(id);
        ancestors.reverse();
        for ancestor in ancestors {
            self.ids.insert(ancestor);
        }
        true
    }
}
