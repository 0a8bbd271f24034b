//! [`MapSurface`] backed by a Leaflet map.

use crate::constants::MAP_PANE;
use crate::dom;
use crate::input;
use crate::leaflet;
use geolink_core::{
    FitOptions, GeoBounds, LatLng, MapSurface, Modifiers, RelayEvent, SyncError, SyncResult,
};
use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Browser event captured on the graph container.
#[derive(Clone, Debug)]
pub struct DomEvent {
    pub event: web::Event,
}

impl DomEvent {
    pub fn new(event: web::Event) -> Self {
        Self { event }
    }
}

impl RelayEvent for DomEvent {
    fn is_primary_button(&self) -> bool {
        // touches have no button
        self.event
            .dyn_ref::<web::MouseEvent>()
            .map(|m| input::is_primary_button(m.button()))
            .unwrap_or(true)
    }

    fn modifiers(&self) -> Modifiers {
        if let Some(m) = self.event.dyn_ref::<web::MouseEvent>() {
            return input::modifiers(m.shift_key(), m.ctrl_key(), m.meta_key(), m.alt_key());
        }
        self.event
            .dyn_ref::<web::TouchEvent>()
            .map(|t| input::modifiers(t.shift_key(), t.ctrl_key(), t.meta_key(), t.alt_key()))
            .unwrap_or_default()
    }

    fn prevent_default(&self) {
        self.event.prevent_default();
    }
}

pub struct LeafletSurface {
    map: leaflet::Map,
    container: web::HtmlElement,
}

impl LeafletSurface {
    pub fn handle(&self) -> &leaflet::Map {
        &self.map
    }
}

impl MapSurface for LeafletSurface {
    type Container = web::HtmlElement;
    type Config = JsValue;
    type Event = DomEvent;

    fn create(container: &Self::Container, config: &Self::Config) -> SyncResult<Self> {
        let map = leaflet::create_map(container, config)
            .map_err(|e| SyncError::Mount(format!("map construction failed: {:?}", e)))?;
        Ok(Self {
            container: map.get_container(),
            map,
        })
    }

    fn coordinate(&self, raw: LatLng) -> Option<LatLng> {
        let value = leaflet::lat_lng(raw.lat, raw.lng).ok()?;
        if value.is_null() || value.is_undefined() {
            return None;
        }
        let ll: leaflet::LatLng = value.unchecked_into();
        let coord = LatLng::new(ll.lat(), ll.lng());
        coord.is_finite().then_some(coord)
    }

    fn project(&self, coord: LatLng) -> Option<DVec2> {
        match self
            .map
            .lat_lng_to_container_point(&dom::pair(coord.lat, coord.lng))
        {
            Ok(p) => Some(DVec2::new(p.x(), p.y())),
            Err(e) => {
                log::trace!("[map] cannot project {}: {:?}", coord, e);
                None
            }
        }
    }

    fn unproject(&self, point: DVec2) -> Option<LatLng> {
        match self
            .map
            .container_point_to_lat_lng(&dom::pair(point.x, point.y))
        {
            Ok(ll) => Some(LatLng::new(ll.lat(), ll.lng())),
            Err(e) => {
                log::trace!("[map] cannot unproject {}: {:?}", point, e);
                None
            }
        }
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, options: FitOptions) {
        let (Some(sw), Some(ne)) = (bounds.south_west(), bounds.north_east()) else {
            return;
        };
        let corners: JsValue =
            js_sys::Array::of2(&dom::pair(sw.lat, sw.lng), &dom::pair(ne.lat, ne.lng)).into();
        let bounds = leaflet::lat_lng_bounds(&corners);
        if !bounds.is_valid() {
            return;
        }
        let opts: JsValue = js_sys::Object::new().into();
        dom::set(
            &opts,
            "padding",
            &dom::pair(options.padding_px, options.padding_px),
        );
        dom::set(&opts, "animate", &options.animate.into());
        self.map.fit_bounds(&bounds, &opts);
    }

    fn invalidate_size(&mut self) {
        self.map.invalidate_size();
    }

    fn owns_target(&self, event: &Self::Event) -> bool {
        dom::is_within(&self.container, &event.event)
    }

    fn redispatch(&self, event: &Self::Event) -> bool {
        let Some(cloned) = dom::clone_event(&event.event) else {
            log::debug!("[relay] no map equivalent for {}", event.event.type_());
            return false;
        };
        let target = self.map.get_pane(MAP_PANE).unwrap_or_else(|| self.container.clone());
        match target.dispatch_event(&cloned) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[relay] dispatch failed: {:?}", e);
                false
            }
        }
    }

    fn remove(&mut self) {
        self.map.remove();
    }
}
