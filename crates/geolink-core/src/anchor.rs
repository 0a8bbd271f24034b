//! Geographic anchors: where each node belongs on the map.

use crate::geo::LatLng;
use crate::options::PositionAccessor;
use crate::state::NodeId;
use crate::surface::MapSurface;
use fnv::FnvHashMap;
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorSource {
    /// Returned by the caller's accessor; re-read on every pass.
    Native,
    /// Cached from the node's last free placement.
    Derived,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub coord: LatLng,
    pub source: AnchorSource,
}

/// Derived anchors keyed by node id, owned by the handler.
#[derive(Clone, Debug, Default)]
pub struct AnchorTable {
    derived: FnvHashMap<NodeId, LatLng>,
}

impl AnchorTable {
    pub fn get(&self, id: &NodeId) -> Option<LatLng> {
        self.derived.get(id).copied()
    }

    pub fn insert(&mut self, id: NodeId, coord: LatLng) -> Option<LatLng> {
        self.derived.insert(id, coord)
    }

    pub fn remove(&mut self, id: &NodeId) -> Option<LatLng> {
        self.derived.remove(id)
    }

    pub fn len(&self) -> usize {
        self.derived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }

    pub fn clear(&mut self) {
        self.derived.clear();
    }
}

/// Node partitions used to pick which nodes follow the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    NativeGeographic,
    Geographic,
    NotNativeGeographic,
    NotGeographic,
}

/// Resolves and projects anchors for one pass over the graph.
pub struct GeoResolver<'a, M> {
    accessor: &'a PositionAccessor,
    table: &'a AnchorTable,
    map: &'a M,
}

impl<'a, M: MapSurface> GeoResolver<'a, M> {
    pub fn new(accessor: &'a PositionAccessor, table: &'a AnchorTable, map: &'a M) -> Self {
        Self {
            accessor,
            table,
            map,
        }
    }

    /// Native anchor if the map accepts the accessor's value, else (unless
    /// `native_only`) the derived one.
    pub fn resolve(&self, id: &NodeId, native_only: bool) -> Option<Anchor> {
        if let Some(coord) = self.native(id) {
            return Some(Anchor {
                coord,
                source: AnchorSource::Native,
            });
        }
        if native_only {
            return None;
        }
        self.table.get(id).map(|coord| Anchor {
            coord,
            source: AnchorSource::Derived,
        })
    }

    fn native(&self, id: &NodeId) -> Option<LatLng> {
        let raw = (self.accessor)(id)?;
        let coord = self.map.coordinate(raw);
        if coord.is_none() {
            log::trace!("[anchor] node {} has invalid coordinate {}", id, raw);
        }
        coord
    }

    pub fn project(&self, id: &NodeId) -> Option<DVec2> {
        self.project_with(id, false)
    }

    pub fn project_with(&self, id: &NodeId, native_only: bool) -> Option<DVec2> {
        self.resolve(id, native_only)
            .and_then(|anchor| self.project_anchor(anchor))
    }

    pub fn project_anchor(&self, anchor: Anchor) -> Option<DVec2> {
        self.map.project(anchor.coord)
    }

    pub fn is_class(&self, id: &NodeId, class: NodeClass) -> bool {
        match class {
            NodeClass::NativeGeographic => self.native(id).is_some(),
            NodeClass::Geographic => self.resolve(id, false).is_some(),
            NodeClass::NotNativeGeographic => self.native(id).is_none(),
            NodeClass::NotGeographic => self.resolve(id, false).is_none(),
        }
    }

    pub fn classify<'n, I>(&self, ids: I, class: NodeClass) -> Vec<NodeId>
    where
        I: IntoIterator<Item = &'n NodeId>,
    {
        ids.into_iter()
            .filter(|id| self.is_class(id, class))
            .cloned()
            .collect()
    }
}
