//! Bindings for the parts of the Cytoscape.js API the handler drives.

use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    /// A graph instance (`cy`).
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Core;

    #[wasm_bindgen(method)]
    pub fn nodes(this: &Core) -> Collection;

    #[wasm_bindgen(method, js_name = getElementById)]
    pub fn get_element_by_id(this: &Core, id: &str) -> Collection;

    #[wasm_bindgen(method)]
    pub fn collection(this: &Core) -> Collection;

    #[wasm_bindgen(method)]
    pub fn container(this: &Core) -> Option<web::HtmlElement>;

    #[wasm_bindgen(method)]
    pub fn zoom(this: &Core) -> f64;

    #[wasm_bindgen(method)]
    pub fn pan(this: &Core) -> JsValue;

    /// Sets zoom and pan together: `cy.viewport({ zoom, pan })`.
    #[wasm_bindgen(method)]
    pub fn viewport(this: &Core, options: &JsValue);

    #[wasm_bindgen(method)]
    pub fn animate(this: &Core, options: &JsValue);

    #[wasm_bindgen(method, js_name = userPanningEnabled)]
    pub fn user_panning_enabled(this: &Core) -> bool;
    #[wasm_bindgen(method, js_name = userPanningEnabled)]
    pub fn set_user_panning_enabled(this: &Core, on: bool);

    #[wasm_bindgen(method, js_name = userZoomingEnabled)]
    pub fn user_zooming_enabled(this: &Core) -> bool;
    #[wasm_bindgen(method, js_name = userZoomingEnabled)]
    pub fn set_user_zooming_enabled(this: &Core, on: bool);

    #[wasm_bindgen(method, js_name = boxSelectionEnabled)]
    pub fn box_selection_enabled(this: &Core) -> bool;
    #[wasm_bindgen(method, js_name = boxSelectionEnabled)]
    pub fn set_box_selection_enabled(this: &Core, on: bool);

    #[wasm_bindgen(method)]
    pub fn autoungrabify(this: &Core) -> bool;
    #[wasm_bindgen(method, js_name = autoungrabify)]
    pub fn set_autoungrabify(this: &Core, on: bool);

    #[wasm_bindgen(method)]
    pub fn autounselectify(this: &Core) -> bool;
    #[wasm_bindgen(method, js_name = autounselectify)]
    pub fn set_autounselectify(this: &Core, on: bool);

    #[wasm_bindgen(method)]
    pub fn on(this: &Core, events: &str, handler: &js_sys::Function);
    #[wasm_bindgen(method, js_name = on)]
    pub fn on_selector(this: &Core, events: &str, selector: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &Core, events: &str, handler: &js_sys::Function);
    #[wasm_bindgen(method, js_name = off)]
    pub fn off_selector(this: &Core, events: &str, selector: &str, handler: &js_sys::Function);

    /// Elements; a single node is a collection of length one.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Collection;

    #[wasm_bindgen(method, getter)]
    pub fn length(this: &Collection) -> u32;

    #[wasm_bindgen(method)]
    pub fn empty(this: &Collection) -> bool;

    #[wasm_bindgen(method, js_name = toArray)]
    pub fn to_array(this: &Collection) -> js_sys::Array;

    #[wasm_bindgen(method)]
    pub fn id(this: &Collection) -> String;

    #[wasm_bindgen(method, js_name = isNode)]
    pub fn is_node(this: &Collection) -> bool;

    /// Model position as a `{x, y}` object.
    #[wasm_bindgen(method)]
    pub fn position(this: &Collection) -> JsValue;
    #[wasm_bindgen(method, js_name = position)]
    pub fn set_position(this: &Collection, pos: &JsValue);

    #[wasm_bindgen(method)]
    pub fn locked(this: &Collection) -> bool;
    #[wasm_bindgen(method)]
    pub fn lock(this: &Collection);
    #[wasm_bindgen(method)]
    pub fn unlock(this: &Collection);

    #[wasm_bindgen(method, js_name = hasClass)]
    pub fn has_class(this: &Collection, class: &str) -> bool;
    #[wasm_bindgen(method, js_name = addClass)]
    pub fn add_class(this: &Collection, class: &str);
    #[wasm_bindgen(method, js_name = removeClass)]
    pub fn remove_class(this: &Collection, class: &str);

    /// Style bypass on the element, ahead of any stylesheet rule.
    #[wasm_bindgen(method, js_name = style)]
    pub fn set_style(this: &Collection, property: &str, value: &str);
    /// Space-separated property names.
    #[wasm_bindgen(method, js_name = removeStyle)]
    pub fn remove_style(this: &Collection, properties: &str);

    /// Adds `other` in place.
    #[wasm_bindgen(method)]
    pub fn merge(this: &Collection, other: &Collection) -> Collection;

    #[wasm_bindgen(method)]
    pub fn layout(this: &Collection, options: &JsValue) -> Layout;

    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Layout;

    #[wasm_bindgen(method)]
    pub fn run(this: &Layout);

    /// Event object handed to `cy.on` callbacks.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type CyEvent;

    /// The core itself for background events, else the element.
    #[wasm_bindgen(method, getter)]
    pub fn target(this: &CyEvent) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = originalEvent)]
    pub fn original_event(this: &CyEvent) -> Option<web::Event>;
}
