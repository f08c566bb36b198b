//! Layered, centered tree layout.
//!
//! Each visible node sits on the layer given by its depth. Within a layer of `k` nodes, the node
//! at index `i` (discovery order) is placed at `x = (i - (k - 1) / 2) * x_spacing` and
//! `y = depth * y_spacing`, which keeps every layer symmetric around `x = 0`.

use crate::config::LayoutConfig;
use crate::document::NodeId;
use crate::visibility::Visibility;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub depth: usize,
    /// Index within the layer, in discovery order.
    pub slot: usize,
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: IndexMap<NodeId, Position>,
    node_width: f64,
    node_height: f64,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.get(id)
    }

    /// Positions in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Position)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of layers, i.e. the maximum depth plus one.
    pub fn layer_count(&self) -> usize {
        self.positions
            .values()
            .map(|p| p.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Box around every placed node, sized by the configured node dimensions.
    pub fn bounds(&self) -> Option<Bounds> {
        let hw = self.node_width / 2.0;
        let hh = self.node_height / 2.0;
        Bounds::from_points(
            self.positions
                .values()
                .flat_map(|p| [(p.x - hw, p.y - hh), (p.x + hw, p.y + hh)]),
        )
    }

    /// The node whose box contains `point`. Later nodes win on overlap since they are drawn on top.
    pub fn hit_test(&self, point: Point) -> Option<&NodeId> {
        let hw = self.node_width / 2.0;
        let hh = self.node_height / 2.0;
        self.positions
            .iter()
            .rev()
            .find(|(_, p)| (point.x - p.x).abs() <= hw && (point.y - p.y).abs() <= hh)
            .map(|(id, _)| id)
    }
}

pub fn layout_visible(visibility: &Visibility, config: &LayoutConfig) -> Layout {
    let mut layers: Vec<Vec<&NodeId>> = Vec::new();
    for node in visibility.nodes() {
        if layers.len() <= node.depth {
            layers.resize_with(node.depth + 1, Vec::new);
        }
        layers[node.depth].push(&node.id);
    }

    let mut positions = IndexMap::with_capacity(visibility.len());
    for (depth, layer) in layers.iter().enumerate() {
        let center = (layer.len() as f64 - 1.0) / 2.0;
        for (slot, id) in layer.iter().enumerate() {
            positions.insert(
                (*id).clone(),
                Position {
                    depth,
                    slot,
                    x: (slot as f64 - center) * config.x_spacing,
                    y: depth as f64 * config.y_spacing,
                },
            );
        }
    }

    Layout {
        positions,
        node_width: config.node_width,
        node_height: config.node_height,
    }
}
