use geolink_core::{LatLng, Modifiers};
use std::time::Duration;

/// DOM `MouseEvent.button` value for the main button.
pub const PRIMARY_BUTTON: i16 = 0;

#[inline]
pub fn is_primary_button(button: i16) -> bool {
    button == PRIMARY_BUTTON
}

#[inline]
pub fn modifiers(shift: bool, ctrl: bool, meta: bool, alt: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        meta,
        alt,
    }
}

/// Event families that can be re-created on the map element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventFamily {
    Wheel,
    Pointer,
    Mouse,
    Touch,
    Other,
}

impl EventFamily {
    /// True when the family has a dispatchable copy on the map element.
    pub fn is_relayable(self) -> bool {
        self != EventFamily::Other
    }
}

pub fn event_family(kind: &str) -> EventFamily {
    if kind == "wheel" {
        EventFamily::Wheel
    } else if kind.starts_with("pointer") {
        EventFamily::Pointer
    } else if kind.starts_with("mouse") || kind == "click" || kind == "dblclick" {
        EventFamily::Mouse
    } else if kind.starts_with("touch") {
        EventFamily::Touch
    } else {
        EventFamily::Other
    }
}

/// Millisecond option values as durations. Negative or non-finite values
/// are rejected.
pub fn duration_from_ms(ms: f64) -> Option<Duration> {
    (ms.is_finite() && ms >= 0.0).then(|| Duration::from_secs_f64(ms / 1000.0))
}

/// Reads a coordinate from the shapes accessors tend to return:
/// `{lat, lng}`, `{lat, lon}` or `[lat, lng]`, already split into fields.
pub fn coordinate_from_parts(
    lat: Option<f64>,
    lng: Option<f64>,
    lon: Option<f64>,
) -> Option<LatLng> {
    let lat = lat?;
    let lng = lng.or(lon)?;
    Some(LatLng::new(lat, lng))
}
