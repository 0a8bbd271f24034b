//! Listener registration. Every callback holds a weak session reference and
//! is removed again by [`Listeners::detach`].

mod graph;
mod map;
mod pointer;

use crate::cytoscape::{Core, CyEvent};
use crate::dom::js_err;
use crate::leaflet;
use crate::session::Session;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct GraphListener {
    events: &'static str,
    selector: Option<&'static str>,
    callback: Closure<dyn FnMut(CyEvent)>,
}

struct MapListener {
    events: &'static str,
    callback: Closure<dyn FnMut(JsValue)>,
}

struct DomListener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

pub struct Listeners {
    core: Core,
    map: leaflet::Map,
    graph: Vec<GraphListener>,
    map_events: Vec<MapListener>,
    dom: Vec<DomListener>,
}

impl Listeners {
    pub fn attach(core: &Core, map: &leaflet::Map, session: &Rc<Session>) -> anyhow::Result<Self> {
        let mut listeners = Self {
            core: core.clone(),
            map: map.clone(),
            graph: Vec::new(),
            map_events: Vec::new(),
            dom: Vec::new(),
        };
        graph::wire(&mut listeners, session);
        map::wire(&mut listeners, session);
        if let Err(err) = pointer::wire(&mut listeners, session) {
            listeners.detach();
            return Err(err);
        }
        log::debug!(
            "[events] attached {} graph, {} map, {} dom listeners",
            listeners.graph.len(),
            listeners.map_events.len(),
            listeners.dom.len()
        );
        Ok(listeners)
    }

    fn on_graph(
        &mut self,
        events: &'static str,
        selector: Option<&'static str>,
        handler: impl FnMut(CyEvent) + 'static,
    ) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(CyEvent)>);
        let f: &js_sys::Function = callback.as_ref().unchecked_ref();
        match selector {
            Some(sel) => self.core.on_selector(events, sel, f),
            None => self.core.on(events, f),
        }
        self.graph.push(GraphListener {
            events,
            selector,
            callback,
        });
    }

    fn on_map(&mut self, events: &'static str, handler: impl FnMut(JsValue) + 'static) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
        self.map.on(events, callback.as_ref().unchecked_ref());
        self.map_events.push(MapListener { events, callback });
    }

    /// Registers a non-passive listener so the handler may cancel the event.
    fn on_dom(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(js_err)?;
        self.dom.push(DomListener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    pub fn detach(self) {
        for l in &self.graph {
            let f: &js_sys::Function = l.callback.as_ref().unchecked_ref();
            match l.selector {
                Some(sel) => self.core.off_selector(l.events, sel, f),
                None => self.core.off(l.events, f),
            }
        }
        for l in &self.map_events {
            self.map.off(l.events, l.callback.as_ref().unchecked_ref());
        }
        for l in &self.dom {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.callback.as_ref().unchecked_ref());
        }
        log::debug!("[events] detached");
    }
}
