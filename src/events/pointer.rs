use super::Listeners;
use crate::constants::{DOM_WHEEL, EVENT_TAP_DRAG, EVENT_TAP_END, EVENT_TAP_START};
use crate::cytoscape::CyEvent;
use crate::map::DomEvent;
use crate::session::{Session, WebHandler};
use geolink_core::{PointerTarget, RelayOutcome};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

fn pointer_target(ev: &CyEvent, core: &JsValue) -> PointerTarget {
    if js_sys::Object::is(&ev.target(), core) {
        PointerTarget::Background
    } else {
        PointerTarget::Element
    }
}

fn relay(
    listeners: &mut Listeners,
    session: &Rc<Session>,
    events: &'static str,
    action: fn(&mut WebHandler, &DomEvent, PointerTarget) -> RelayOutcome,
) {
    let s = Rc::downgrade(session);
    let core: JsValue = listeners.core.clone().into();
    listeners.on_graph(events, None, move |ev: CyEvent| {
        let Some(session) = s.upgrade() else { return };
        let Some(original) = ev.original_event() else { return };
        let target = pointer_target(&ev, &core);
        let event = DomEvent::new(original);
        // re-entrant deliveries come from our own redispatch
        if session.try_with(|h| action(h, &event, target)).is_none() {
            log::trace!("[relay] dropped re-entrant {}", events);
        }
    });
}

pub fn wire(listeners: &mut Listeners, session: &Rc<Session>) -> anyhow::Result<()> {
    relay(listeners, session, EVENT_TAP_START, |h, e, t| h.on_pointer_down(e, t));
    relay(listeners, session, EVENT_TAP_DRAG, |h, e, _| h.on_pointer_move(e));
    relay(listeners, session, EVENT_TAP_END, |h, e, _| h.on_pointer_up(e));

    let Some(container) = listeners.core.container() else {
        log::warn!("[relay] graph has no container; wheel is not relayed");
        return Ok(());
    };
    let s = Rc::downgrade(session);
    let target: web::EventTarget = container.into();
    listeners.on_dom(&target, DOM_WHEEL, move |ev: web::Event| {
        let Some(session) = s.upgrade() else { return };
        let event = DomEvent::new(ev);
        _ = session.try_with(|h| h.on_wheel(&event));
    })
}
