//! Render model handed to the pan/zoom/minimap diagram surface.

use crate::config::LayoutConfig;
use crate::document::{Connection, NodeId};
use crate::edges::{DiagramEdge, resolve_edges};
use crate::expansion::ExpandedSet;
use crate::graph::GraphModel;
use crate::layout::{Bounds, Point, layout_visible};
use crate::selection::Selection;
use crate::visibility::compute_visibility;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewModel {
    /// The document has no nodes.
    NoData,
    Ready(DiagramView),
}

impl ViewModel {
    pub fn diagram(&self) -> Option<&DiagramView> {
        match self {
            Self::NoData => None,
            Self::Ready(diagram) => Some(diagram),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<DiagramEdge>,
    pub bounds: Option<Bounds>,
    pub selected_id: Option<NodeId>,
}

impl DiagramView {
    pub fn node(&self, id: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNode {
    pub id: NodeId,
    pub position: Point,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub has_children: bool,
}

/// Derives the full render model from the input and the interaction state.
pub fn build_view(
    graph: &GraphModel,
    connections: &[Connection],
    expanded: &ExpandedSet,
    selection: &Selection,
    config: &LayoutConfig,
) -> ViewModel {
    if graph.is_empty() {
        return ViewModel::NoData;
    }

    let visibility = compute_visibility(graph, expanded);
    let layout = layout_visible(&visibility, config);
    let edges = resolve_edges(graph, &visibility, expanded, connections);

    let nodes = layout
        .iter()
        .filter_map(|(id, position)| {
            let node = graph.node(id.as_str())?;
            Some(ViewNode {
                id: id.clone(),
                position: position.point(),
                label: node.label.clone(),
                description: node.description.clone(),
                depth: position.depth,
                is_expanded: expanded.contains(id.as_str()),
                is_selected: selection.is_selected(id.as_str()),
                has_children: graph.has_children(id.as_str()),
            })
        })
        .collect();

    tracing::debug!(
        visible = visibility.len(),
        edges = edges.len(),
        layers = layout.layer_count(),
        "recomputed mind-map view"
    );

    ViewModel::Ready(DiagramView {
        nodes,
        edges,
        bounds: layout.bounds(),
        selected_id: selection.selected_id().cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;
    use serde_json::json;

    #[test]
    fn empty_graph_is_no_data() {
        let view = build_view(
            &GraphModel::default(),
            &[],
            &ExpandedSet::default(),
            &Selection::default(),
            &LayoutConfig::default(),
        );
        assert_eq!(view, ViewModel::NoData);
        assert_eq!(serde_json::to_value(&view).unwrap(), json!({"state": "noData"}));
    }

    #[test]
    fn ready_view_serializes_render_boundary_shape() {
        let g = GraphModel::build([
            Node::new("root", "Root", None).with_description("topic"),
            Node::new("a", "A", Some("root")),
        ]);
        let mut selection = Selection::default();
        selection.select(&g, "a");
        let view = build_view(
            &g,
            &[],
            &ExpandedSet::with_root(g.root()),
            &selection,
            &LayoutConfig::default(),
        );
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["state"], "ready");
        assert_eq!(value["selectedId"], "a");
        assert_eq!(
            value["nodes"][0],
            json!({
                "id": "root",
                "position": {"x": 0.0, "y": 0.0},
                "label": "Root",
                "description": "topic",
                "depth": 0,
                "isExpanded": true,
                "isSelected": false,
                "hasChildren": true
            })
        );
        assert_eq!(value["nodes"][1]["isSelected"], true);
        assert_eq!(
            value["edges"][0],
            json!({"id": "tree:root->a", "source": "root", "target": "a", "variant": "tree"})
        );
        assert_eq!(value["bounds"]["minY"], -24.0);
    }
}
