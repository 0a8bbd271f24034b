//! [`GraphSurface`] over a live Cytoscape instance.

use crate::constants::{DEFAULT_LAYOUT, HIDDEN_STYLE_PROPERTY, HIDDEN_STYLE_VALUE};
use crate::cytoscape::{Collection, Core};
use crate::dom;
use crate::overlay;
use geolink_core::{
    GraphSurface, InteractionFlags, NodeId, SyncError, SyncResult, Transition, Viewport,
    HIDDEN_CLASS,
};
use glam::DVec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct CyGraph {
    core: Core,
}

impl CyGraph {
    pub fn new(core: Core) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    fn node(&self, id: &NodeId) -> Option<Collection> {
        let el = self.core.get_element_by_id(id.as_str());
        (!el.empty() && el.is_node()).then_some(el)
    }

    fn collect(&self, ids: &[NodeId]) -> Collection {
        let nodes = self.core.collection();
        for el in ids.iter().filter_map(|id| self.node(id)) {
            nodes.merge(&el);
        }
        nodes
    }
}

impl GraphSurface for CyGraph {
    type Container = web::HtmlElement;
    type LayoutConfig = JsValue;

    fn node_ids(&self) -> Vec<NodeId> {
        self.core
            .nodes()
            .to_array()
            .iter()
            .map(|n| NodeId(n.unchecked_into::<Collection>().id()))
            .collect()
    }

    fn position(&self, id: &NodeId) -> Option<DVec2> {
        dom::read_xy(&self.node(id)?.position())
    }

    fn set_position(&mut self, id: &NodeId, pos: DVec2) {
        let Some(node) = self.node(id) else { return };
        // locked nodes ignore position writes
        let locked = node.locked();
        if locked {
            node.unlock();
        }
        node.set_position(&dom::xy_object(pos));
        if locked {
            node.lock();
        }
    }

    fn is_locked(&self, id: &NodeId) -> bool {
        self.node(id).map(|n| n.locked()).unwrap_or(false)
    }

    fn set_locked(&mut self, id: &NodeId, locked: bool) {
        if let Some(node) = self.node(id) {
            if locked {
                node.lock();
            } else {
                node.unlock();
            }
        }
    }

    fn has_class(&self, id: &NodeId, class: &str) -> bool {
        self.node(id).map(|n| n.has_class(class)).unwrap_or(false)
    }

    fn set_class(&mut self, id: &NodeId, class: &str, on: bool) {
        if let Some(node) = self.node(id) {
            if on {
                node.add_class(class);
            } else {
                node.remove_class(class);
            }
            // the hidden marker is enforced by a style bypass on the node
            // itself, so it holds when the caller swaps the stylesheet
            if class == HIDDEN_CLASS {
                if on {
                    node.set_style(HIDDEN_STYLE_PROPERTY, HIDDEN_STYLE_VALUE);
                } else {
                    node.remove_style(HIDDEN_STYLE_PROPERTY);
                }
            }
        }
    }

    fn viewport(&self) -> Viewport {
        let pan = dom::read_xy(&self.core.pan()).unwrap_or(DVec2::NAN);
        Viewport {
            zoom: self.core.zoom(),
            pan,
        }
    }

    fn set_viewport(&mut self, viewport: Viewport, transition: Option<Transition>) {
        let options: JsValue = js_sys::Object::new().into();
        dom::set(&options, "zoom", &viewport.zoom.into());
        dom::set(&options, "pan", &dom::xy_object(viewport.pan));
        match transition {
            Some(t) => {
                dom::set(&options, "duration", &(t.duration.as_millis() as f64).into());
                self.core.animate(&options);
            }
            None => self.core.viewport(&options),
        }
    }

    fn interaction(&self) -> InteractionFlags {
        InteractionFlags {
            user_panning: self.core.user_panning_enabled(),
            user_zooming: self.core.user_zooming_enabled(),
            box_selection: self.core.box_selection_enabled(),
            auto_ungrabify: self.core.autoungrabify(),
        }
    }

    fn set_interaction(&mut self, flags: InteractionFlags) {
        self.core.set_user_panning_enabled(flags.user_panning);
        self.core.set_user_zooming_enabled(flags.user_zooming);
        self.core.set_box_selection_enabled(flags.box_selection);
        self.core.set_autoungrabify(flags.auto_ungrabify);
    }

    fn mount_overlay(&mut self) -> SyncResult<Self::Container> {
        let host = self
            .core
            .container()
            .ok_or_else(|| SyncError::Mount("graph has no container element".to_string()))?;
        overlay::mount(&host).map_err(|e| SyncError::Mount(format!("{:#}", e)))
    }

    fn unmount_overlay(&mut self, overlay: Self::Container) {
        overlay::unmount(&overlay);
    }

    fn run_preset(&mut self, positions: &[(NodeId, DVec2)], transition: Option<Transition>) {
        if positions.is_empty() {
            return;
        }
        let table: JsValue = js_sys::Object::new().into();
        for (id, pos) in positions {
            dom::set(&table, id.as_str(), &dom::xy_object(*pos));
        }
        let ids: Vec<NodeId> = positions.iter().map(|(id, _)| id.clone()).collect();
        let options: JsValue = js_sys::Object::new().into();
        dom::set(&options, "name", &"preset".into());
        dom::set(&options, "positions", &table);
        dom::set(&options, "fit", &false.into());
        dom::set(&options, "animate", &transition.is_some().into());
        if let Some(t) = transition {
            dom::set(
                &options,
                "animationDuration",
                &(t.duration.as_millis() as f64).into(),
            );
        }
        self.collect(&ids).layout(&options).run();
    }

    fn run_layout(&mut self, nodes: &[NodeId], config: Option<&Self::LayoutConfig>) {
        if nodes.is_empty() {
            return;
        }
        let options: JsValue = js_sys::Object::new().into();
        match config {
            Some(cfg) => {
                _ = js_sys::Object::assign(options.unchecked_ref(), cfg.unchecked_ref());
            }
            None => dom::set(&options, "name", &DEFAULT_LAYOUT.into()),
        }
        self.collect(nodes).layout(&options).run();
    }

    fn suppress_unselect(&mut self) {
        // the tap that follows this release would clear the selection
        let core = self.core.clone();
        let previous = core.autounselectify();
        core.set_autounselectify(true);
        let restore = Closure::once_into_js(move || core.set_autounselectify(previous));
        if let Some(window) = web::window() {
            _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                restore.unchecked_ref(),
                0,
            );
        }
    }
}
