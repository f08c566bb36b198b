//! Document ingestion: validates a [`MindmapDocument`] and turns it into a [`GraphModel`].
//!
//! Data-quality problems never abort the view. Each one is resolved by a fixed policy and
//! reported as a [`Diagnostic`]:
//! - no parentless node: the first node becomes the root
//! - extra parentless nodes: re-attached under the root
//! - `parentId` naming an unknown node: re-attached under the root
//! - parent cycles: the affected nodes stay unreachable and are never shown
//! - connections naming unknown nodes: kept, but can never render
//!
//! Duplicate ids are the one exception: strict ingestion rejects them.

use crate::document::{Connection, MindmapDocument, Node, NodeId};
use crate::graph::GraphModel;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub reject_duplicates: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::strict()
    }
}

impl IngestOptions {
    /// Duplicate node ids are returned as [`Error::DuplicateNodeId`].
    pub fn strict() -> Self {
        Self {
            reject_duplicates: true,
        }
    }

    /// Duplicate node ids keep their first occurrence and are reported as diagnostics.
    pub fn lenient() -> Self {
        Self {
            reject_duplicates: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    #[serde(rename_all = "camelCase")]
    MissingRoot { fallback: NodeId },
    #[serde(rename_all = "camelCase")]
    MultipleRoots { id: NodeId, root: NodeId },
    #[serde(rename_all = "camelCase")]
    DanglingParent {
        id: NodeId,
        parent_id: NodeId,
        attached_to: NodeId,
    },
    #[serde(rename_all = "camelCase")]
    DuplicateId { id: NodeId },
    #[serde(rename_all = "camelCase")]
    Unreachable { id: NodeId },
    #[serde(rename_all = "camelCase")]
    DanglingConnection {
        index: usize,
        source: NodeId,
        target: NodeId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot { fallback } => {
                write!(f, "no node without a parent; using \"{fallback}\" as root")
            }
            Self::MultipleRoots { id, root } => {
                write!(f, "node \"{id}\" has no parent; attached under root \"{root}\"")
            }
            Self::DanglingParent {
                id,
                parent_id,
                attached_to,
            } => write!(
                f,
                "node \"{id}\" references unknown parent \"{parent_id}\"; attached under \"{attached_to}\""
            ),
            Self::DuplicateId { id } => {
                write!(f, "duplicate node id \"{id}\"; keeping the first occurrence")
            }
            Self::Unreachable { id } => {
                write!(f, "node \"{id}\" is not reachable from the root (parent cycle)")
            }
            Self::DanglingConnection {
                index,
                source,
                target,
            } => write!(
                f,
                "connection #{index} ({source} -> {target}) references an unknown node"
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub graph: GraphModel,
    pub connections: Vec<Connection>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn ingest(document: MindmapDocument, options: IngestOptions) -> Result<Ingested> {
    let MindmapDocument { nodes, connections } = document;
    let mut diagnostics = Vec::new();

    let mut arena: IndexMap<NodeId, Node> = IndexMap::with_capacity(nodes.len());
    for node in nodes {
        if arena.contains_key(&node.id) {
            if options.reject_duplicates {
                return Err(Error::DuplicateNodeId { id: node.id });
            }
            tracing::warn!(id = %node.id, "dropping node with duplicate id");
            diagnostics.push(Diagnostic::DuplicateId { id: node.id });
            continue;
        }
        arena.insert(node.id.clone(), node);
    }

    let root = match arena.values().find(|n| n.parent_id.is_none()) {
        Some(root) => Some(root.id.clone()),
        None => {
            let fallback = arena.first().map(|(id, _)| id.clone());
            if let Some(fallback) = &fallback {
                tracing::warn!(root = %fallback, "no parentless node; falling back to first node");
                diagnostics.push(Diagnostic::MissingRoot {
                    fallback: fallback.clone(),
                });
            }
            fallback
        }
    };

    if let Some(root) = &root {
        let known: Vec<NodeId> = arena.keys().cloned().collect();
        for id in known {
            if &id == root {
                continue;
            }
            let Some(parent_id) = arena.get(&id).map(|n| n.parent_id.clone()) else {
                continue;
            };
            match &parent_id {
                None => {
                    tracing::warn!(%id, %root, "extra parentless node attached under root");
                    diagnostics.push(Diagnostic::MultipleRoots {
                        id: id.clone(),
                        root: root.clone(),
                    });
                    reparent(&mut arena, &id, root);
                }
                Some(parent) if !arena.contains_key(parent) => {
                    tracing::warn!(%id, parent_id = %parent, %root, "dangling parent reference attached under root");
                    diagnostics.push(Diagnostic::DanglingParent {
                        id: id.clone(),
                        parent_id: parent.clone(),
                        attached_to: root.clone(),
                    });
                    reparent(&mut arena, &id, root);
                }
                Some(_) => {}
            }
        }
    }

    let graph = GraphModel::build(arena.into_values());

    let reachable = graph.reachable_from_root();
    for node in graph.nodes() {
        if !reachable.contains(&node.id) {
            tracing::warn!(id = %node.id, "node is unreachable from root");
            diagnostics.push(Diagnostic::Unreachable {
                id: node.id.clone(),
            });
        }
    }

    for (index, connection) in connections.iter().enumerate() {
        if !graph.contains(connection.source.as_str()) || !graph.contains(connection.target.as_str())
        {
            tracing::warn!(
                index,
                source = %connection.source,
                target = %connection.target,
                "connection references an unknown node"
            );
            diagnostics.push(Diagnostic::DanglingConnection {
                index,
                source: connection.source.clone(),
                target: connection.target.clone(),
            });
        }
    }

    tracing::debug!(
        nodes = graph.len(),
        connections = connections.len(),
        diagnostics = diagnostics.len(),
        "ingested mind-map document"
    );

    Ok(Ingested {
        graph,
        connections,
        diagnostics,
    })
}

fn reparent(arena: &mut IndexMap<NodeId, Node>, id: &NodeId, parent: &NodeId) {
    if let Some(node) = arena.get_mut(id) {
        node.parent_id = Some(parent.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(nodes: Vec<Node>) -> MindmapDocument {
        MindmapDocument::new(nodes, Vec::new())
    }

    #[test]
    fn clean_document_has_no_diagnostics() {
        let ingested = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("a", "A", Some("root")),
            ]),
            IngestOptions::strict(),
        )
        .unwrap();
        assert!(ingested.diagnostics.is_empty());
        assert_eq!(ingested.graph.len(), 2);
    }

    #[test]
    fn strict_rejects_duplicate_ids() {
        let err = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("a", "A", Some("root")),
                Node::new("a", "A again", Some("root")),
            ]),
            IngestOptions::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateNodeId { ref id } if id.as_str() == "a"));
        assert_eq!(err.to_string(), "Duplicate node id: a");
    }

    #[test]
    fn lenient_keeps_first_duplicate() {
        let ingested = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("a", "A", Some("root")),
                Node::new("a", "A again", Some("root")),
            ]),
            IngestOptions::lenient(),
        )
        .unwrap();
        assert_eq!(
            ingested.diagnostics,
            vec![Diagnostic::DuplicateId { id: "a".into() }]
        );
        assert_eq!(ingested.graph.node("a").unwrap().label, "A");
        assert_eq!(ingested.graph.children("root").len(), 1);
    }

    #[test]
    fn dangling_parent_is_attached_to_root() {
        let ingested = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("orphan", "Orphan", Some("ghost")),
            ]),
            IngestOptions::strict(),
        )
        .unwrap();
        assert_eq!(
            ingested.diagnostics,
            vec![Diagnostic::DanglingParent {
                id: "orphan".into(),
                parent_id: "ghost".into(),
                attached_to: "root".into(),
            }]
        );
        assert_eq!(ingested.graph.children("root"), &[NodeId::from("orphan")]);
    }

    #[test]
    fn extra_roots_are_attached_to_first_root() {
        let ingested = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("other", "Other", None),
            ]),
            IngestOptions::strict(),
        )
        .unwrap();
        assert_eq!(
            ingested.diagnostics,
            vec![Diagnostic::MultipleRoots {
                id: "other".into(),
                root: "root".into(),
            }]
        );
        assert_eq!(ingested.graph.parent("other").map(NodeId::as_str), Some("root"));
    }

    #[test]
    fn missing_root_falls_back_to_first_node() {
        let ingested = ingest(
            doc(vec![
                Node::new("first", "First", Some("second")),
                Node::new("second", "Second", Some("first")),
            ]),
            IngestOptions::strict(),
        )
        .unwrap();
        assert_eq!(
            ingested.diagnostics,
            vec![Diagnostic::MissingRoot {
                fallback: "first".into()
            }]
        );
        assert_eq!(ingested.graph.root().map(NodeId::as_str), Some("first"));
        assert_eq!(ingested.graph.children("first"), &[NodeId::from("second")]);
    }

    #[test]
    fn cycles_are_reported_as_unreachable() {
        let ingested = ingest(
            doc(vec![
                Node::new("root", "Root", None),
                Node::new("p", "P", Some("q")),
                Node::new("q", "Q", Some("p")),
            ]),
            IngestOptions::strict(),
        )
        .unwrap();
        assert_eq!(
            ingested.diagnostics,
            vec![
                Diagnostic::Unreachable { id: "p".into() },
                Diagnostic::Unreachable { id: "q".into() },
            ]
        );
    }

    #[test]
    fn dangling_connections_are_kept_and_reported() {
        let ingested = ingest(
            MindmapDocument::new(
                vec![Node::new("root", "Root", None)],
                vec![Connection::new("root", "nowhere")],
            ),
            IngestOptions::strict(),
        )
        .unwrap();
        assert_eq!(ingested.connections.len(), 1);
        assert_eq!(
            ingested.diagnostics,
            vec![Diagnostic::DanglingConnection {
                index: 0,
                source: "root".into(),
                target: "nowhere".into(),
            }]
        );
    }

    #[test]
    fn empty_document_is_not_an_error() {
        let ingested = ingest(MindmapDocument::default(), IngestOptions::strict()).unwrap();
        assert!(ingested.graph.is_empty());
        assert!(ingested.diagnostics.is_empty());
    }

    #[test]
    fn diagnostics_serialize_with_kind_tag() {
        let value = serde_json::to_value(Diagnostic::DanglingParent {
            id: "x".into(),
            parent_id: "ghost".into(),
            attached_to: "root".into(),
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "danglingParent",
                "id": "x",
                "parentId": "ghost",
                "attachedTo": "root"
            })
        );
    }
}
