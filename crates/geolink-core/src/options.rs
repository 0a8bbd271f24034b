use crate::constants::{DEFAULT_ANIMATION_DURATION, DEFAULT_DELAY_ON_MOVE};
use crate::error::{SyncError, SyncResult};
use crate::geo::LatLng;
use crate::state::{NodeId, Transition};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Native anchor accessor. Returning `None` means the node has no position.
pub type PositionAccessor = Rc<dyn Fn(&NodeId) -> Option<LatLng>>;
/// Receives the coordinate a node was dropped at.
pub type PositionSetter = Rc<dyn Fn(&NodeId, LatLng)>;

/// Caller-facing handler options. `L` is the graph's layout configuration.
pub struct SyncOptions<L> {
    pub get_position: Option<PositionAccessor>,
    pub set_position: Option<PositionSetter>,
    pub animate: bool,
    pub animation_duration: Duration,
    pub layout: Option<L>,
    pub hide_non_positional: bool,
    pub delay_on_move: Duration,
}

impl<L> Default for SyncOptions<L> {
    fn default() -> Self {
        Self {
            get_position: None,
            set_position: None,
            animate: false,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            layout: None,
            hide_non_positional: true,
            delay_on_move: DEFAULT_DELAY_ON_MOVE,
        }
    }
}

impl<L> SyncOptions<L> {
    pub fn new(get_position: impl Fn(&NodeId) -> Option<LatLng> + 'static) -> Self {
        Self {
            get_position: Some(Rc::new(get_position)),
            ..Self::default()
        }
    }

    pub fn set_position(mut self, setter: impl Fn(&NodeId, LatLng) + 'static) -> Self {
        self.set_position = Some(Rc::new(setter));
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn layout(mut self, layout: L) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn hide_non_positional(mut self, hide: bool) -> Self {
        self.hide_non_positional = hide;
        self
    }

    pub fn delay_on_move(mut self, delay: Duration) -> Self {
        self.delay_on_move = delay;
        self
    }

    /// Checks required fields; nothing is touched when this fails.
    pub fn validate(self) -> SyncResult<SyncConfig<L>> {
        let get_position = self.get_position.ok_or_else(|| {
            SyncError::Configuration("getPosition accessor is required".to_string())
        })?;
        Ok(SyncConfig {
            get_position,
            set_position: self.set_position,
            animate: self.animate,
            animation_duration: self.animation_duration,
            layout: self.layout,
            hide_non_positional: self.hide_non_positional,
            delay_on_move: self.delay_on_move,
        })
    }
}

/// Validated options held by a running handler.
pub struct SyncConfig<L> {
    pub get_position: PositionAccessor,
    pub set_position: Option<PositionSetter>,
    pub animate: bool,
    pub animation_duration: Duration,
    pub layout: Option<L>,
    pub hide_non_positional: bool,
    pub delay_on_move: Duration,
}

impl<L> SyncConfig<L> {
    pub fn transition(&self) -> Option<Transition> {
        self.animate.then_some(Transition {
            duration: self.animation_duration,
        })
    }
}

impl<L> fmt::Debug for SyncConfig<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("set_position", &self.set_position.is_some())
            .field("animate", &self.animate)
            .field("animation_duration", &self.animation_duration)
            .field("layout", &self.layout.is_some())
            .field("hide_non_positional", &self.hide_non_positional)
            .field("delay_on_move", &self.delay_on_move)
            .finish()
    }
}
