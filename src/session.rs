//! One attached handler plus the browser wiring that feeds it.
//!
//! Cytoscape and Leaflet fire some events synchronously from inside calls
//! the handler makes (a layout run emits `layoutstart`, `fitBounds` emits
//! `move`). Those arrive while the handler is borrowed: lifecycle events
//! are queued and replayed once the borrow ends, relayed input is dropped.

use crate::cytoscape::Core;
use crate::events::Listeners;
use crate::graph::CyGraph;
use crate::leaflet;
use crate::map::LeafletSurface;
use crate::options;
use crate::scheduler::WebScheduler;
use geolink_core::{PositionSyncHandler, TaskId};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;

pub type WebHandler = PositionSyncHandler<CyGraph, LeafletSurface, WebScheduler>;

type Deferred = Box<dyn FnOnce(&mut WebHandler)>;

pub struct Session {
    map: leaflet::Map,
    handler: RefCell<WebHandler>,
    deferred: RefCell<VecDeque<Deferred>>,
    listeners: RefCell<Option<Listeners>>,
    destroyed: Cell<bool>,
}

impl Session {
    pub fn attach(
        core: Core,
        map_options: &JsValue,
        options: &JsValue,
    ) -> anyhow::Result<Rc<Self>> {
        let options = options::parse(&core, options)?;

        let slot: Rc<RefCell<Weak<Session>>> = Rc::default();
        let fire_slot = slot.clone();
        let scheduler = WebScheduler::new(move |task: TaskId| {
            let session = fire_slot.borrow().upgrade();
            if let Some(session) = session {
                session.with(move |h| {
                    let started = Instant::now();
                    if h.fire(task) {
                        log::trace!("[frame] task {} ran in {:?}", task.0, started.elapsed());
                    }
                });
            }
        })?;

        let graph = CyGraph::new(core.clone());
        let handler = PositionSyncHandler::new(graph, map_options, scheduler, options)?;
        let map = handler
            .map()
            .map(|m| m.handle().clone())
            .ok_or_else(|| anyhow::anyhow!("handler attached without a map"))?;

        let session = Rc::new(Session {
            map: map.clone(),
            handler: RefCell::new(handler),
            deferred: RefCell::default(),
            listeners: RefCell::default(),
            destroyed: Cell::new(false),
        });
        *slot.borrow_mut() = Rc::downgrade(&session);

        match Listeners::attach(&core, &map, &session) {
            Ok(listeners) => *session.listeners.borrow_mut() = Some(listeners),
            Err(err) => {
                session.destroy();
                return Err(err);
            }
        }
        Ok(session)
    }

    pub fn map(&self) -> &leaflet::Map {
        &self.map
    }

    /// Runs `f` now, or after the current borrow ends when called re-entrantly.
    pub fn with(&self, f: impl FnOnce(&mut WebHandler) + 'static) {
        if self.destroyed.get() {
            return;
        }
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => f(&mut handler),
            Err(_) => {
                self.deferred.borrow_mut().push_back(Box::new(f));
                return;
            }
        }
        self.drain();
    }

    /// Runs `f` only if the handler is free. Re-entrant calls yield `None`.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut WebHandler) -> R) -> Option<R> {
        if self.destroyed.get() {
            return None;
        }
        let result = {
            let mut handler = self.handler.try_borrow_mut().ok()?;
            f(&mut handler)
        };
        self.drain();
        Some(result)
    }

    fn drain(&self) {
        loop {
            let Ok(mut handler) = self.handler.try_borrow_mut() else {
                return;
            };
            let next = self.deferred.borrow_mut().pop_front();
            match next {
                Some(f) => f(&mut handler),
                None => return,
            }
        }
    }

    /// Detaches every listener, then restores the graph.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(listeners) = self.listeners.borrow_mut().take() {
            listeners.detach();
        }
        self.deferred.borrow_mut().clear();
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => handler.destroy(),
            Err(_) => {
                // called from inside a handler callback; finish once it returns
                self.deferred
                    .borrow_mut()
                    .push_back(Box::new(|h: &mut WebHandler| h.destroy()));
            }
        }
    }
}
