use crate::document::{Connection, NodeId};
use crate::expansion::ExpandedSet;
use crate::graph::GraphModel;
use crate::visibility::Visibility;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeVariant {
    /// Parent -> child relation of the tree.
    Tree,
    /// A declared connection between two nodes; drawn with a distinct style.
    CrossLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub variant: EdgeVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Tree edges first (in visibility order), then cross-links (in declaration order).
pub fn resolve_edges(
    graph: &GraphModel,
    visibility: &Visibility,
    expanded: &ExpandedSet,
    connections: &[Connection],
) -> Vec<DiagramEdge> {
    let mut edges = tree_edges(graph, visibility, expanded);
    edges.extend(cross_link_edges(visibility, connections));
    edges
}

pub fn tree_edges(
    graph: &GraphModel,
    visibility: &Visibility,
    expanded: &ExpandedSet,
) -> Vec<DiagramEdge> {
    visibility
        .ids()
        .filter_map(|child| {
            let parent = graph.parent(child.as_str())?;
            (visibility.contains(parent.as_str()) && expanded.contains(parent.as_str())).then(|| {
                DiagramEdge {
                    id: format!("tree:{parent}->{child}"),
                    source: parent.clone(),
                    target: child.clone(),
                    variant: EdgeVariant::Tree,
                    label: None,
                }
            })
        })
        .collect()
}

/// A connection renders only while both of its endpoints are visible.
pub fn cross_link_edges(visibility: &Visibility, connections: &[Connection]) -> Vec<DiagramEdge> {
    connections
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            visibility.contains(c.source.as_str()) && visibility.contains(c.target.as_str())
        })
        .map(|(index, c)| DiagramEdge {
            id: format!("link:{index}:{}->{}", c.source, c.target),
            source: c.source.clone(),
            target: c.target.clone(),
            variant: EdgeVariant::CrossLink,
            label: c.label.clone(),
        })
        .collect()
}
