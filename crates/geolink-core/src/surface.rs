//! Collaborator interfaces: the graph canvas, the map, and the raw input
//! events relayed between them.

use crate::error::SyncResult;
use crate::geo::{FitOptions, GeoBounds, LatLng};
use crate::state::{InteractionFlags, NodeId, Transition, Viewport};
use glam::DVec2;

/// Graph-visualization canvas whose nodes are positioned by the handler.
///
/// Calls naming a node that no longer exists must be ignored by the
/// implementation.
pub trait GraphSurface {
    /// Element hosting the map overlay.
    type Container;
    /// Caller-supplied configuration for the default layout.
    type LayoutConfig;

    fn node_ids(&self) -> Vec<NodeId>;
    fn position(&self, id: &NodeId) -> Option<DVec2>;
    /// Writes a node position, even when the node is locked.
    fn set_position(&mut self, id: &NodeId, pos: DVec2);

    fn is_locked(&self, id: &NodeId) -> bool;
    fn set_locked(&mut self, id: &NodeId, locked: bool);

    fn has_class(&self, id: &NodeId, class: &str) -> bool;
    fn set_class(&mut self, id: &NodeId, class: &str, on: bool);

    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport, transition: Option<Transition>);

    fn interaction(&self) -> InteractionFlags;
    fn set_interaction(&mut self, flags: InteractionFlags);

    /// Creates a full-size container inside the graph's own element.
    fn mount_overlay(&mut self) -> SyncResult<Self::Container>;
    fn unmount_overlay(&mut self, overlay: Self::Container);

    /// Moves nodes to explicit positions without fitting the viewport.
    fn run_preset(&mut self, positions: &[(NodeId, DVec2)], transition: Option<Transition>);
    /// Runs the configured layout, or the graph's automatic one, over `nodes`.
    fn run_layout(&mut self, nodes: &[NodeId], config: Option<&Self::LayoutConfig>);

    /// Keeps the release of a pan gesture from clearing the selection.
    fn suppress_unselect(&mut self);
}

/// Raw pointer or wheel event captured on the graph surface.
pub trait RelayEvent {
    fn is_primary_button(&self) -> bool;
    fn modifiers(&self) -> Modifiers;
    fn prevent_default(&self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Chords the graph uses for additive or box selection.
    #[inline]
    pub fn is_multi_select(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Interactive map rendered underneath the graph.
pub trait MapSurface: Sized {
    type Container;
    type Config;
    type Event: RelayEvent;

    fn create(container: &Self::Container, config: &Self::Config) -> SyncResult<Self>;

    /// Coordinate constructor; `None` for values the map rejects.
    fn coordinate(&self, raw: LatLng) -> Option<LatLng> {
        raw.is_finite().then_some(raw)
    }

    /// Geographic coordinate to container point. `None` while the map has
    /// no view to project against.
    fn project(&self, coord: LatLng) -> Option<DVec2>;
    /// Container point to geographic coordinate. `None` while the map has
    /// no view.
    fn unproject(&self, point: DVec2) -> Option<LatLng>;

    fn fit_bounds(&mut self, bounds: &GeoBounds, options: FitOptions);
    fn invalidate_size(&mut self);

    /// True when the event's target lies inside the map's own element tree.
    fn owns_target(&self, event: &Self::Event) -> bool;
    /// Dispatches an equivalent event on the map element. False when the
    /// event could not be re-created or delivered.
    fn redispatch(&self, event: &Self::Event) -> bool;

    fn remove(&mut self);
}
