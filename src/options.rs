//! Reads the JavaScript options object passed to `cy.leaflet(...)`.

use crate::cytoscape::Core;
use crate::dom;
use crate::input::{coordinate_from_parts, duration_from_ms};
use crate::leaflet;
use geolink_core::{LatLng, NodeId, SyncError, SyncOptions, SyncResult};
use wasm_bindgen::{JsCast, JsValue};

fn function(options: &JsValue, key: &str) -> SyncResult<Option<js_sys::Function>> {
    match dom::field(options, key) {
        None => Ok(None),
        Some(v) => v
            .dyn_into::<js_sys::Function>()
            .map(Some)
            .map_err(|_| SyncError::Configuration(format!("{} must be a function", key))),
    }
}

fn flag(options: &JsValue, key: &str) -> Option<bool> {
    dom::field(options, key).and_then(|v| v.as_bool())
}

fn duration(options: &JsValue, key: &str) -> SyncResult<Option<std::time::Duration>> {
    match dom::field(options, key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .and_then(duration_from_ms)
            .map(Some)
            .ok_or_else(|| {
                SyncError::Configuration(format!("{} must be a non-negative number", key))
            }),
    }
}

/// Coordinate returned by a `getPosition` accessor.
pub fn coordinate(raw: &JsValue) -> Option<LatLng> {
    if raw.is_null() || raw.is_undefined() {
        return None;
    }
    if js_sys::Array::is_array(raw) {
        let arr: &js_sys::Array = raw.unchecked_ref();
        return coordinate_from_parts(arr.get(0).as_f64(), arr.get(1).as_f64(), None);
    }
    coordinate_from_parts(
        dom::number(raw, "lat"),
        dom::number(raw, "lng"),
        dom::number(raw, "lon"),
    )
}

/// Builds handler options. Accessors receive the Cytoscape node, as callers
/// of the JavaScript API expect.
pub fn parse(core: &Core, options: &JsValue) -> SyncResult<SyncOptions<JsValue>> {
    if options.is_undefined() || options.is_null() || !options.is_object() {
        return Err(SyncError::Configuration(
            "options object with getPosition is required".to_string(),
        ));
    }
    let get_position = function(options, "getPosition")?;
    let set_position = function(options, "setPosition")?;

    let mut parsed: SyncOptions<JsValue> = match get_position {
        Some(f) => {
            let core = core.clone();
            SyncOptions::new(move |id: &NodeId| {
                let node = core.get_element_by_id(id.as_str());
                if node.empty() {
                    return None;
                }
                match f.call1(&JsValue::NULL, &node) {
                    Ok(raw) => coordinate(&raw),
                    Err(e) => {
                        log::warn!("[options] getPosition threw for {}: {:?}", id, e);
                        None
                    }
                }
            })
        }
        None => SyncOptions::default(),
    };
    if let Some(f) = set_position {
        let core = core.clone();
        parsed = parsed.set_position(move |id: &NodeId, coord: LatLng| {
            let node = core.get_element_by_id(id.as_str());
            if node.empty() {
                return;
            }
            let lat_lng = leaflet::lat_lng(coord.lat, coord.lng)
                .unwrap_or_else(|_| dom::pair(coord.lat, coord.lng));
            if let Err(e) = f.call2(&JsValue::NULL, &node, &lat_lng) {
                log::warn!("[options] setPosition threw for {}: {:?}", id, e);
            }
        });
    }

    if let Some(animate) = flag(options, "animate") {
        parsed = parsed.animate(animate);
    }
    if let Some(d) = duration(options, "animationDuration")? {
        parsed = parsed.animation_duration(d);
    }
    if let Some(hide) = flag(options, "hideNonPositional") {
        parsed = parsed.hide_non_positional(hide);
    }
    if let Some(d) = duration(options, "delayOnMove")? {
        parsed = parsed.delay_on_move(d);
    }
    if let Some(layout) = dom::field(options, "layout") {
        if !layout.is_object() {
            return Err(SyncError::Configuration(
                "layout must be an options object".to_string(),
            ));
        }
        parsed = parsed.layout(layout);
    }
    Ok(parsed)
}
