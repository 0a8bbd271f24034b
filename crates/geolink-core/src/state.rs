//! Snapshot and mode types owned by the handler.
//!
//! These types avoid any platform API so the web front end and the host
//! tests share them unchanged.

use fnv::FnvHashMap;
use glam::DVec2;
use std::fmt;
use std::time::Duration;

/// Identity of a graph node as reported by the graph surface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zoom and pan of the graph surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: DVec2,
}

impl Viewport {
    /// Model coordinates equal rendered pixels under this viewport, which is
    /// what makes graph positions comparable with map container points.
    pub const IDENTITY: Viewport = Viewport {
        zoom: 1.0,
        pan: DVec2::ZERO,
    };
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// User interaction toggles of the graph surface that compete with the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionFlags {
    pub user_panning: bool,
    pub user_zooming: bool,
    pub box_selection: bool,
    pub auto_ungrabify: bool,
}

impl InteractionFlags {
    /// Flags applied while the map owns panning and zooming.
    pub fn with_map_control(self) -> Self {
        Self {
            user_panning: false,
            user_zooming: false,
            box_selection: false,
            ..self
        }
    }
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self {
            user_panning: true,
            user_zooming: true,
            box_selection: true,
            auto_ungrabify: false,
        }
    }
}

/// Animated transition request for viewport or layout changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
}

/// What the graph looked like before the handler took over.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSnapshot {
    pub viewport: Viewport,
    pub interaction: InteractionFlags,
}

/// Pre-handler node positions, extended as nodes are added.
#[derive(Clone, Debug, Default)]
pub struct OriginalPositions {
    positions: FnvHashMap<NodeId, DVec2>,
}

impl OriginalPositions {
    /// Records `pos` unless the node already has an original position.
    pub fn record(&mut self, id: &NodeId, pos: DVec2) {
        self.positions.entry(id.clone()).or_insert(pos);
    }

    pub fn get(&self, id: &NodeId) -> Option<DVec2> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Empties the map, returning its entries sorted by node id.
    pub fn take(&mut self) -> Vec<(NodeId, DVec2)> {
        let mut out: Vec<_> = self.positions.drain().collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionMode {
    /// A map drag driven by graph pointer events is in progress.
    pub panning: bool,
    /// A non-geographic layout is animating node positions.
    pub layouting: bool,
    /// Between the map's move-start and move-end.
    pub map_moving: bool,
}
