//! Input document shape as handed over by the storage/fetch layer.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// `None` (or an absent/`null` JSON field) marks the root.
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent_id: parent_id.map(NodeId::from),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A cross-link between two nodes that is not a parent/child relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl MindmapDocument {
    pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Self {
        Self { nodes, connections }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_id_accepts_null_and_absent() {
        let doc = MindmapDocument::from_json_str(
            r#"{"nodes":[
                {"id":"root","label":"Root","parentId":null},
                {"id":"a","label":"A","parentId":"root","description":"first"},
                {"id":"b","label":"B"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.nodes[0].parent_id, None);
        assert_eq!(doc.nodes[1].parent_id, Some(NodeId::from("root")));
        assert_eq!(doc.nodes[1].description.as_deref(), Some("first"));
        assert_eq!(doc.nodes[2].parent_id, None);
        assert!(doc.connections.is_empty());
    }

    #[test]
    fn connections_are_optional_and_keep_labels() {
        let doc = MindmapDocument::from_json_str(
            r#"{"nodes":[],"connections":[{"source":"b","target":"a1","label":"see also"}]}"#,
        )
        .unwrap();
        assert!(doc.is_empty());
        assert_eq!(
            doc.connections,
            vec![Connection::new("b", "a1").with_label("see also")]
        );
    }

    #[test]
    fn missing_label_is_a_json_error() {
        let err = MindmapDocument::from_json_str(r#"{"nodes":[{"id":"x"}]}"#).unwrap_err();
        assert!(err.to_string().contains("label"));
    }
}
