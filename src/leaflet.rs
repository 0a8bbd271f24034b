//! Bindings for the Leaflet map API, read from the global `L`.

use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container: &web::HtmlElement, options: &JsValue) -> Result<Map, JsValue>;

    /// Accepts anything `L.latLng` does, e.g. `[lat, lng]`. Throws until the
    /// map has a center and zoom.
    #[wasm_bindgen(catch, method, js_name = latLngToContainerPoint)]
    pub fn lat_lng_to_container_point(this: &Map, lat_lng: &JsValue) -> Result<Point, JsValue>;

    /// Accepts anything `L.point` does, e.g. `[x, y]`. Throws until the map
    /// has a center and zoom.
    #[wasm_bindgen(catch, method, js_name = containerPointToLatLng)]
    pub fn container_point_to_lat_lng(this: &Map, point: &JsValue) -> Result<LatLng, JsValue>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &LatLngBounds, options: &JsValue);

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &Map);

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &Map) -> web::HtmlElement;

    #[wasm_bindgen(method, js_name = getPane)]
    pub fn get_pane(this: &Map, name: &str) -> Option<web::HtmlElement>;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, events: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &Map, events: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &Map);

    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type LatLng;

    /// Throws on NaN; returns null for null-ish input.
    #[wasm_bindgen(catch, js_namespace = L, js_name = latLng)]
    pub fn lat_lng(lat: f64, lng: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &LatLng) -> f64;

    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Point;

    #[wasm_bindgen(method, getter)]
    pub fn x(this: &Point) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn y(this: &Point) -> f64;

    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type LatLngBounds;

    /// `corners` is `[[south, west], [north, east]]`.
    #[wasm_bindgen(js_namespace = L, js_name = latLngBounds)]
    pub fn lat_lng_bounds(corners: &JsValue) -> LatLngBounds;

    #[wasm_bindgen(method, js_name = isValid)]
    pub fn is_valid(this: &LatLngBounds) -> bool;
}
