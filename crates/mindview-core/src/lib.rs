#![forbid(unsafe_code)]

//! Headless core of an interactive mind-map viewer.
//!
//! A flat, parent-referenced node list (plus optional cross-links) becomes an incrementally
//! expandable tree diagram:
//! - [`GraphModel`]: node arena and parent -> children index
//! - [`compute_visibility`]: visible set from the expanded set
//! - [`layout_visible`]: layered, centered positions
//! - [`resolve_edges`]: tree edges and cross-links between visible nodes
//! - [`ExpandedSet`] / [`Selection`]: the only mutable interaction state
//!
//! [`Viewer`] ties these together; [`ViewModel`] is what a drawing surface consumes.

pub mod config;
pub mod document;
pub mod edges;
pub mod error;
pub mod expansion;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod selection;
pub mod view;
mod viewer;
pub mod visibility;


pub use config::{LayoutConfig, ViewerConfig};
pub use document::{Connection, MindmapDocument, Node, NodeId};
pub use edges::{DiagramEdge, EdgeVariant, resolve_edges};
pub use error::{Error, Result};
pub use expansion::{ExpandedSet, ToggleOutcome};
pub use graph::GraphModel;
pub use ingest::{Diagnostic, IngestOptions, Ingested, ingest};
pub use layout::{Bounds, Layout, Point, Position, layout_visible};
pub use selection::Selection;
pub use view::{DiagramView, ViewModel, ViewNode, build_view};
pub use viewer::Viewer;
pub use visibility::{Visibility, VisibleNode, compute_visibility};
