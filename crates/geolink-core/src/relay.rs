//! Hands graph-surface input over to the map so the user pans and zooms the
//! map while pointing at the graph.

use crate::surface::{MapSurface, RelayEvent};

/// What a pointer-down landed on, as reported by the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas; the gesture is free for the map.
    Background,
    /// A node or edge; the graph's own grab/select handling owns the gesture.
    Element,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Forwarded,
    /// Originated inside the map already; forwarding would loop.
    OwnTarget,
    /// Not a gesture the map should see.
    Ignored,
}

impl RelayOutcome {
    #[inline]
    pub fn forwarded(self) -> bool {
        self == RelayOutcome::Forwarded
    }
}

/// Primary-button press on the background without a selection chord.
#[inline]
pub fn starts_pan<E: RelayEvent>(event: &E, target: PointerTarget) -> bool {
    target == PointerTarget::Background
        && event.is_primary_button()
        && !event.modifiers().is_multi_select()
}

pub fn forward_event<M: MapSurface>(map: &M, event: &M::Event) -> RelayOutcome {
    if map.owns_target(event) {
        return RelayOutcome::OwnTarget;
    }
    if map.redispatch(event) {
        RelayOutcome::Forwarded
    } else {
        RelayOutcome::Ignored
    }
}
