#![cfg(target_arch = "wasm32")]
//! Browser front-end: registers `cy.leaflet(mapOptions, options)` on
//! Cytoscape.js and drives the position handler from Cytoscape and Leaflet
//! events.

use crate::constants::EXTENSION_NAME;
use crate::cytoscape::Core;
use crate::session::Session;
use geolink_core::SyncError;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod cytoscape;
mod dom;
mod events;
mod graph;
mod input;
mod leaflet;
mod map;
mod options;
mod overlay;
mod scheduler;
mod session;
mod tasks;

/// Handle returned by `cy.leaflet(...)`.
#[wasm_bindgen]
pub struct GeoSync {
    session: Rc<Session>,
}

#[wasm_bindgen]
impl GeoSync {
    /// Removes the map and gives the graph back as it was found.
    pub fn destroy(&self) {
        self.session.destroy();
        log::info!("[lifecycle] detached");
    }

    /// Fits the map to the anchored nodes.
    pub fn fit(&self) {
        self.session.with(|h| {
            if !h.fit() {
                log::debug!("[lifecycle] nothing to fit");
            }
        });
    }

    /// Re-runs the layout for nodes without a native position.
    pub fn relayout(&self) {
        self.session.with(|h| h.relayout());
    }

    /// The underlying Leaflet map, for adding tile layers and controls.
    pub fn map(&self) -> JsValue {
        self.session.map().clone().into()
    }
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    let e = js_sys::Error::new(&format!("{:#}", err));
    match err.downcast_ref::<SyncError>() {
        Some(SyncError::Configuration(_)) => e.set_name("ConfigurationError"),
        Some(SyncError::Mount(_)) => e.set_name("MountError"),
        None => {}
    }
    e.into()
}

fn attach(core: JsValue, map_options: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let core: Core = core.unchecked_into();
    match Session::attach(core, &map_options, &options) {
        Ok(session) => Ok(GeoSync { session }.into()),
        Err(err) => {
            log::error!("[lifecycle] attach failed: {:#}", err);
            Err(to_js_error(err))
        }
    }
}

/// Installs the `leaflet` core extension on the given `cytoscape` function.
#[wasm_bindgen]
pub fn register(cytoscape: &js_sys::Function) -> Result<(), JsValue> {
    let factory = Closure::wrap(Box::new(attach)
        as Box<dyn FnMut(JsValue, JsValue, JsValue) -> Result<JsValue, JsValue>>);
    // Cytoscape passes the core as `this`
    let shim = js_sys::Function::new_with_args(
        "attach",
        "return function (mapOptions, options) { return attach(this, mapOptions, options); };",
    );
    let method = shim.call1(&JsValue::NULL, factory.as_ref())?;
    factory.forget();
    cytoscape.call3(
        &JsValue::NULL,
        &JsValue::from_str("core"),
        &JsValue::from_str(EXTENSION_NAME),
        &method,
    )?;
    log::info!("[lifecycle] registered cy.{}", EXTENSION_NAME);
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    // script-tag builds find Cytoscape on the window
    let global = web::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("cytoscape")).ok())
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok());
    if let Some(cytoscape) = global {
        register(&cytoscape)?;
    }
    Ok(())
}
