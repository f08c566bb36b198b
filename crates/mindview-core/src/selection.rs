use crate::document::NodeId;
use crate::expansion::{ExpandedSet, ToggleOutcome};
use crate::graph::GraphModel;

/// At most one selected node; drives the detail panel and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.as_str() == id)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Selects `id` without touching the expansion state. Unknown ids leave the selection as is.
    pub fn select(&mut self, graph: &GraphModel, id: &str) -> bool {
        match graph.node(id) {
            Some(node) => {
                self.selected = Some(node.id.clone());
                true
            }
            None => {
                tracing::warn!(%id, "select on unknown node ignored");
                false
            }
        }
    }

    /// A pointer click: `None` is a click on empty canvas.
    ///
    /// Clicking a node with children toggles it and selects it; clicking a leaf only selects it.
    pub fn click(
        &mut self,
        graph: &GraphModel,
        expanded: &mut ExpandedSet,
        target: Option<&str>,
    ) -> ToggleOutcome {
        let Some(id) = target else {
            self.clear();
            return ToggleOutcome::Ignored;
        };
        if !self.select(graph, id) {
            return ToggleOutcome::Ignored;
        }
        if graph.has_children(id) {
            expanded.toggle(graph, id)
        } else {
            ToggleOutcome::Ignored
        }
    }
}
