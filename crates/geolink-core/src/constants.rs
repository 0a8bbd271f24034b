//! Default tuning for the position synchronizer.
//!
//! The animation duration and settle delay are only defaults; callers
//! override them through [`crate::SyncOptions`].
use std::time::Duration;

// Viewport transitions (normalize on construct, restore on destroy)
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

// Wait after a map move ends before releasing move locks
pub const DEFAULT_DELAY_ON_MOVE: Duration = Duration::from_millis(250);

// Padding (container px) applied on every side when fitting the map
pub const FIT_PADDING_PX: f64 = 50.0;

// Positions closer than this (px) are treated as unchanged
pub const POSITION_EPSILON: f64 = 1e-6;

// Class toggled on nodes that have no geographic position
pub const HIDDEN_CLASS: &str = "geolink-hidden";
