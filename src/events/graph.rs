use super::Listeners;
use crate::constants::{
    EVENT_ADD, EVENT_DATA, EVENT_DRAG_FREE, EVENT_LAYOUT_START, EVENT_LAYOUT_STOP, EVENT_RESIZE,
    NODE_SELECTOR,
};
use crate::cytoscape::{Collection, CyEvent};
use crate::session::{Session, WebHandler};
use geolink_core::NodeId;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;

fn target_node(ev: &CyEvent) -> Option<NodeId> {
    let target = ev.target();
    if target.is_undefined() || target.is_null() {
        return None;
    }
    let el: Collection = target.unchecked_into();
    el.is_node().then(|| NodeId(el.id()))
}

pub fn wire(listeners: &mut Listeners, session: &Rc<Session>) {
    let weak = Rc::downgrade(session);

    let s = weak.clone();
    listeners.on_graph(EVENT_ADD, Some(NODE_SELECTOR), move |ev: CyEvent| {
        let (Some(session), Some(id)) = (s.upgrade(), target_node(&ev)) else {
            return;
        };
        session.with(move |h| h.on_node_added(&id));
    });

    let s = weak.clone();
    listeners.on_graph(EVENT_DRAG_FREE, Some(NODE_SELECTOR), move |ev: CyEvent| {
        let (Some(session), Some(id)) = (s.upgrade(), target_node(&ev)) else {
            return;
        };
        session.with(move |h| h.on_drag_free(&id));
    });

    let s = weak.clone();
    listeners.on_graph(EVENT_DATA, Some(NODE_SELECTOR), move |_| {
        if let Some(session) = s.upgrade() {
            session.with(|h| h.on_data_changed());
        }
    });

    lifecycle(listeners, &weak, EVENT_RESIZE, |h| h.on_resize());
    lifecycle(listeners, &weak, EVENT_LAYOUT_START, |h| h.on_layout_start());
    lifecycle(listeners, &weak, EVENT_LAYOUT_STOP, |h| h.on_layout_stop());
}

fn lifecycle(
    listeners: &mut Listeners,
    weak: &Weak<Session>,
    events: &'static str,
    action: fn(&mut WebHandler),
) {
    let s = weak.clone();
    listeners.on_graph(events, None, move |_| {
        if let Some(session) = s.upgrade() {
            session.with(action);
        }
    });
}
