use crate::constants::{OVERLAY_CLASS, OVERLAY_STYLE};
use crate::dom::js_err;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Inserts the map container as the first child of `host`, so the graph's
/// canvases paint over it.
pub fn mount(host: &web::HtmlElement) -> anyhow::Result<web::HtmlElement> {
    let document = host
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("graph container is detached"))?;
    let el: web::HtmlElement = document
        .create_element("div")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not an HtmlElement"))?;
    el.set_class_name(OVERLAY_CLASS);
    el.set_attribute("style", OVERLAY_STYLE).map_err(js_err)?;
    host.insert_before(&el, host.first_child().as_ref())
        .map_err(js_err)?;
    Ok(el)
}

#[inline]
pub fn unmount(el: &web::HtmlElement) {
    if let Some(parent) = el.parent_node() {
        _ = parent.remove_child(el);
    }
}
