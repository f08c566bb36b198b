use crate::config::ViewerConfig;
use crate::document::{Connection, MindmapDocument, NodeId};
use crate::edges::{DiagramEdge, resolve_edges};
use crate::expansion::{ExpandedSet, ToggleOutcome};
use crate::graph::GraphModel;
use crate::ingest::{Diagnostic, Ingested, ingest};
use crate::layout::{Layout, Point, layout_visible};
use crate::selection::Selection;
use crate::view::{ViewModel, build_view};
use crate::visibility::{Visibility, compute_visibility};
use crate::Result;

/// One interactive mind-map view.
///
/// Holds the ingested document and the only two pieces of mutable state: the expanded set and
/// the selection. Visibility, layout, edges and the render model are recomputed on every call
/// and are never cached here.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
    graph: GraphModel,
    connections: Vec<Connection>,
    diagnostics: Vec<Diagnostic>,
    expanded: ExpandedSet,
    selection: Selection,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn from_document(document: MindmapDocument, config: ViewerConfig) -> Result<Self> {
        let mut viewer = Self::new(config);
        viewer.load(document)?;
        Ok(viewer)
    }

    /// Replaces the document. The expansion state resets to the root and the selection clears.
    /// On error the previous document and state are kept.
    pub fn load(&mut self, document: MindmapDocument) -> Result<()> {
        let Ingested {
            graph,
            connections,
            diagnostics,
        } = ingest(document, self.config.ingest_options())?;
        self.expanded.reset(graph.root());
        self.selection.clear();
        self.graph = graph;
        self.connections = connections;
        self.diagnostics = diagnostics;
        Ok(())
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Layout settings can change without reloading; ingestion settings apply on the next load.
    pub fn set_config(&mut self, config: ViewerConfig) {
        self.config = config;
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selection.selected_id()
    }

    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        self.expanded.toggle(&self.graph, id)
    }

    /// `None` is a click on empty canvas.
    pub fn click(&mut self, target: Option<&str>) -> ToggleOutcome {
        self.selection
            .click(&self.graph, &mut self.expanded, target)
    }

    /// Resolves the node under `point` in the current layout and clicks it.
    pub fn click_at(&mut self, point: Point) -> Option<NodeId> {
        let hit = self.layout().hit_test(point).cloned();
        self.click(hit.as_ref().map(NodeId::as_str));
        hit
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.selection.select(&self.graph, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn expand_all(&mut self) {
        self.expanded.expand_all(&self.graph);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.collapse_all(&self.graph);
    }

    pub fn reveal(&mut self, id: &str) -> bool {
        self.expanded.reveal(&self.graph, id)
    }

    pub fn visibility(&self) -> Visibility {
        compute_visibility(&self.graph, &self.expanded)
    }

    pub fn layout(&self) -> Layout {
        layout_visible(&self.visibility(), &self.config.layout)
    }

    pub fn edges(&self) -> Vec<DiagramEdge> {
        resolve_edges(
            &self.graph,
            &self.visibility(),
            &self.expanded,
            &self.connections,
        )
    }

    pub fn view(&self) -> ViewModel {
        build_view(
            &self.graph,
            &self.connections,
            &self.expanded,
            &self.selection,
            &self.config.layout,
        )
    }
}
