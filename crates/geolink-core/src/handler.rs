//! The position-sync handler: lifecycle, graph and map event entry points.
//!
//! The host owns the event wiring. Every listener it installs forwards to
//! one of the `on_*` methods below, and every wake-up requested through the
//! [`Scheduler`] comes back through [`PositionSyncHandler::fire`].

use crate::anchor::{Anchor, AnchorTable, GeoResolver, NodeClass};
use crate::constants::{FIT_PADDING_PX, HIDDEN_CLASS};
use crate::error::SyncResult;
use crate::geo::{FitOptions, GeoBounds, LatLng};
use crate::options::{SyncConfig, SyncOptions};
use crate::relay::{forward_event, starts_pan, PointerTarget, RelayOutcome};
use crate::scheduler::{Scheduler, TaskId, TaskSlot};
use crate::state::{
    GraphSnapshot, InteractionFlags, InteractionMode, NodeId, OriginalPositions, Viewport,
};
use crate::surface::{GraphSurface, MapSurface, RelayEvent};
use crate::sync::{self, capture_derived, clear_derived, NodeLedger, SyncPolicy, SyncReport};
use glam::DVec2;

/// Which nodes a synchronization pass moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncScope {
    /// Every node with a native or derived anchor.
    Geographic,
    /// Natively anchored nodes only; used while a layout owns the rest.
    NativeOnly,
}

pub struct PositionSyncHandler<G, M, S>
where
    G: GraphSurface,
    M: MapSurface<Container = G::Container>,
    S: Scheduler,
{
    graph: G,
    map: Option<M>,
    overlay: Option<G::Container>,
    scheduler: S,
    config: SyncConfig<G::LayoutConfig>,
    snapshot: Option<GraphSnapshot>,
    originals: OriginalPositions,
    anchors: AnchorTable,
    ledger: NodeLedger,
    mode: InteractionMode,
    frame: TaskSlot<SyncScope>,
    settle: TaskSlot<()>,
}

impl<G, M, S> PositionSyncHandler<G, M, S>
where
    G: GraphSurface,
    M: MapSurface<Container = G::Container>,
    S: Scheduler,
{
    /// Takes over `graph`: mounts the map, fits it to the anchored nodes and
    /// moves every anchored node onto it.
    ///
    /// Fails without side effects on invalid options. A failed mount rolls
    /// back whatever was already changed on the graph.
    pub fn new(
        mut graph: G,
        map_config: &M::Config,
        scheduler: S,
        options: SyncOptions<G::LayoutConfig>,
    ) -> SyncResult<Self> {
        let config = options.validate()?;

        let snapshot = GraphSnapshot {
            viewport: graph.viewport(),
            interaction: graph.interaction(),
        };
        let mut originals = OriginalPositions::default();
        for id in graph.node_ids() {
            if let Some(pos) = graph.position(&id) {
                originals.record(&id, pos);
            }
        }
        graph.set_interaction(snapshot.interaction.with_map_control());

        let mut handler = Self {
            graph,
            map: None,
            overlay: None,
            scheduler,
            config,
            snapshot: Some(snapshot),
            originals,
            anchors: AnchorTable::default(),
            ledger: NodeLedger::default(),
            mode: InteractionMode::default(),
            frame: TaskSlot::default(),
            settle: TaskSlot::default(),
        };

        if let Err(err) = handler.mount(map_config) {
            log::error!("[lifecycle] {}", err);
            handler.destroy();
            return Err(err);
        }

        handler.fit();
        let transition = handler.config.transition();
        handler.graph.set_viewport(Viewport::IDENTITY, transition);
        let report = handler.sync();
        log::info!(
            "[lifecycle] attached: {} nodes tracked, {} placed, {} hidden",
            handler.originals.len(),
            report.written + report.unchanged,
            report.hidden
        );
        Ok(handler)
    }

    fn mount(&mut self, map_config: &M::Config) -> SyncResult<()> {
        let overlay = self.graph.mount_overlay()?;
        let map = M::create(&overlay, map_config);
        self.overlay = Some(overlay);
        self.map = Some(map?);
        Ok(())
    }

    /// Gives the graph back in the state it was found in.
    ///
    /// Safe to call repeatedly and after a failed construction: every step
    /// whose collaborator is already gone is skipped.
    pub fn destroy(&mut self) {
        self.frame.cancel(&mut self.scheduler);
        self.settle.cancel(&mut self.scheduler);

        // Nodes that bypassed `on_node_added` and have nowhere to go back to.
        let unplaced: Vec<NodeId> = match self.map.as_ref() {
            Some(map) => {
                let resolver = GeoResolver::new(&self.config.get_position, &self.anchors, map);
                self.graph
                    .node_ids()
                    .into_iter()
                    .filter(|id| !self.originals.contains(id))
                    .filter(|id| resolver.is_class(id, NodeClass::NotGeographic))
                    .collect()
            }
            None => Vec::new(),
        };

        let transition = self.config.transition();
        match self.snapshot.take() {
            Some(snapshot) => {
                self.graph.set_interaction(snapshot.interaction);
                let viewport = if is_usable(&snapshot.viewport) {
                    snapshot.viewport
                } else {
                    Viewport::IDENTITY
                };
                self.graph.set_viewport(viewport, transition);
            }
            None => log::debug!("[lifecycle] no graph snapshot to restore"),
        }

        match self.map.take() {
            Some(mut map) => map.remove(),
            None => log::debug!("[lifecycle] map already removed"),
        }
        if let Some(overlay) = self.overlay.take() {
            self.graph.unmount_overlay(overlay);
        }

        let mut locked: Vec<NodeId> = self
            .ledger
            .anchor_locks
            .drain()
            .chain(self.ledger.move_locks.drain())
            .collect();
        locked.sort();
        locked.dedup();
        for id in &locked {
            self.graph.set_locked(id, false);
        }
        for id in self.ledger.hidden.drain() {
            self.graph.set_class(&id, HIDDEN_CLASS, false);
        }
        self.anchors.clear();

        let restored = self.originals.take();
        if !restored.is_empty() {
            self.graph.run_preset(&restored, transition);
        }
        if !unplaced.is_empty() {
            self.graph.run_layout(&unplaced, self.config.layout.as_ref());
        }
        if !restored.is_empty() || !locked.is_empty() {
            log::info!(
                "[lifecycle] detached: {} positions restored, {} nodes unlocked",
                restored.len(),
                locked.len()
            );
        }
        self.mode = InteractionMode::default();
    }

    pub fn is_active(&self) -> bool {
        self.map.is_some()
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn config(&self) -> &SyncConfig<G::LayoutConfig> {
        &self.config
    }

    pub fn derived_anchor(&self, id: &NodeId) -> Option<LatLng> {
        self.anchors.get(id)
    }

    pub fn original_position(&self, id: &NodeId) -> Option<DVec2> {
        self.originals.get(id)
    }

    // ---------------- Resolver ----------------

    pub fn resolve_anchor(&self, id: &NodeId, native_only: bool) -> Option<Anchor> {
        let map = self.map.as_ref()?;
        GeoResolver::new(&self.config.get_position, &self.anchors, map).resolve(id, native_only)
    }

    pub fn project_to_screen(&self, id: &NodeId) -> Option<DVec2> {
        let map = self.map.as_ref()?;
        GeoResolver::new(&self.config.get_position, &self.anchors, map).project(id)
    }

    pub fn classify(&self, class: NodeClass) -> Vec<NodeId> {
        let Some(map) = self.map.as_ref() else {
            return Vec::new();
        };
        let ids = self.graph.node_ids();
        GeoResolver::new(&self.config.get_position, &self.anchors, map).classify(&ids, class)
    }

    // ---------------- Synchronizer ----------------

    /// Full pass over every node using the scope of the current mode.
    pub fn sync(&mut self) -> SyncReport {
        let ids = self.graph.node_ids();
        self.apply_positions(&ids, self.scope())
    }

    pub fn apply_positions(&mut self, ids: &[NodeId], scope: SyncScope) -> SyncReport {
        let Some(map) = self.map.as_ref() else {
            return SyncReport::default();
        };
        let resolver = GeoResolver::new(&self.config.get_position, &self.anchors, map);
        let policy = SyncPolicy {
            native_only: scope == SyncScope::NativeOnly,
            hide_non_positional: self.config.hide_non_positional,
            lock_native: self.config.set_position.is_none(),
        };
        let report =
            sync::apply_positions(&mut self.graph, &resolver, &mut self.ledger, ids, policy);
        if report.written > 0 || report.hidden > 0 || report.shown > 0 {
            log::trace!("[sync] {:?} {:?}", scope, report);
        }
        self.prune_superseded(ids);
        report
    }

    /// Derived anchors of nodes that meanwhile gained a native one.
    fn prune_superseded(&mut self, ids: &[NodeId]) {
        if self.anchors.is_empty() {
            return;
        }
        let Some(map) = self.map.as_ref() else {
            return;
        };
        let superseded: Vec<NodeId> = {
            let resolver = GeoResolver::new(&self.config.get_position, &self.anchors, map);
            ids.iter()
                .filter(|id| self.anchors.get(id).is_some())
                .filter(|id| resolver.is_class(id, NodeClass::NativeGeographic))
                .cloned()
                .collect()
        };
        clear_derived(&mut self.anchors, &superseded);
    }

    pub fn capture_derived_anchors(&mut self, ids: &[NodeId]) -> usize {
        let Some(map) = self.map.as_ref() else {
            return 0;
        };
        capture_derived(
            &self.graph,
            map,
            &self.config.get_position,
            &mut self.anchors,
            ids,
        )
    }

    pub fn clear_derived_anchors(&mut self, ids: &[NodeId]) -> usize {
        clear_derived(&mut self.anchors, ids)
    }

    /// Fits the map to every anchored node. Returns false when there is
    /// nothing to fit to.
    pub fn fit(&mut self) -> bool {
        let Some(map) = self.map.as_mut() else {
            return false;
        };
        let bounds: GeoBounds = {
            let resolver = GeoResolver::new(&self.config.get_position, &self.anchors, &*map);
            self.graph
                .node_ids()
                .iter()
                .filter_map(|id| resolver.resolve(id, false))
                .map(|anchor| anchor.coord)
                .collect()
        };
        if !bounds.is_valid() {
            log::debug!("[lifecycle] no anchored nodes, skipping fit");
            return false;
        }
        map.fit_bounds(
            &bounds,
            FitOptions {
                padding_px: FIT_PADDING_PX,
                animate: false,
            },
        );
        true
    }

    /// Drops derived anchors and lets the default layout place every node
    /// that has no native anchor. The result is captured on layout stop.
    pub fn relayout(&mut self) {
        if !self.is_active() {
            return;
        }
        let targets = self.classify(NodeClass::NotNativeGeographic);
        if targets.is_empty() {
            // no layout runs, so no layout stop would end the layouting mode
            log::debug!("[layout] relayout skipped, every node is natively anchored");
            return;
        }
        let cleared = clear_derived(&mut self.anchors, &targets);
        log::debug!(
            "[layout] relayout of {} nodes ({} derived anchors dropped)",
            targets.len(),
            cleared
        );
        self.mode.layouting = true;
        self.graph.run_layout(&targets, self.config.layout.as_ref());
    }

    fn scope(&self) -> SyncScope {
        if self.mode.layouting {
            SyncScope::NativeOnly
        } else {
            SyncScope::Geographic
        }
    }

    // ---------------- Graph events ----------------

    pub fn on_node_added(&mut self, id: &NodeId) {
        if !self.is_active() {
            return;
        }
        if let Some(pos) = self.graph.position(id) {
            self.originals.record(id, pos);
        }
        self.apply_positions(std::slice::from_ref(id), self.scope());
    }

    pub fn on_resize(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.invalidate_size();
        }
    }

    /// A node was dropped after a user drag.
    pub fn on_drag_free(&mut self, id: &NodeId) {
        let Some(map) = self.map.as_ref() else {
            return;
        };
        let Some(pos) = self.graph.position(id) else {
            return;
        };
        let Some(coord) = map.unproject(pos) else {
            log::debug!("[drag] map has no view yet, drop of {} ignored", id);
            return;
        };
        match &self.config.set_position {
            Some(setter) => {
                log::debug!("[drag] node {} dropped at {}", id, coord);
                setter(id, coord);
                self.anchors.remove(id);
            }
            None => {
                self.anchors.insert(id.clone(), coord);
            }
        }
        self.apply_positions(std::slice::from_ref(id), self.scope());
    }

    pub fn on_data_changed(&mut self) {
        self.sync();
    }

    pub fn on_layout_start(&mut self) {
        self.mode.layouting = true;
    }

    pub fn on_layout_stop(&mut self) {
        self.mode.layouting = false;
        if !self.is_active() {
            return;
        }
        let targets = self.classify(NodeClass::NotNativeGeographic);
        let captured = self.capture_derived_anchors(&targets);
        log::debug!("[layout] captured {} derived anchors", captured);
        self.sync();
    }

    // ---------------- Map events ----------------

    pub fn on_map_move_start(&mut self) {
        if !self.is_active() {
            return;
        }
        self.mode.map_moving = true;
        self.settle.cancel(&mut self.scheduler);
        for id in self.graph.node_ids() {
            if !self.graph.is_locked(&id) {
                self.graph.set_locked(&id, true);
                self.ledger.move_locks.insert(id);
            }
        }
    }

    /// Coalesced: at most one frame pass is pending and it uses the scope of
    /// the latest move.
    pub fn on_map_move(&mut self) {
        if !self.is_active() {
            return;
        }
        let scope = self.scope();
        let scheduler = &mut self.scheduler;
        self.frame.request(scope, || scheduler.request_frame());
    }

    pub fn on_map_move_end(&mut self) {
        if !self.is_active() {
            return;
        }
        self.mode.map_moving = false;
        let delay = self.config.delay_on_move;
        self.settle.restart(&mut self.scheduler, (), delay);
    }

    /// Runs the work behind a wake-up. Returns false for stale or unknown ids.
    pub fn fire(&mut self, task: TaskId) -> bool {
        if let Some(scope) = self.frame.complete(task) {
            let ids = self.graph.node_ids();
            self.apply_positions(&ids, scope);
            return true;
        }
        if self.settle.complete(task).is_some() {
            self.release_move_locks();
            return true;
        }
        false
    }

    fn release_move_locks(&mut self) {
        let released: Vec<NodeId> = self.ledger.move_locks.drain().collect();
        for id in &released {
            if !self.ledger.anchor_locks.contains(id) {
                self.graph.set_locked(id, false);
            }
        }
        log::trace!("[sync] released {} move locks", released.len());
    }

    // ---------------- Input relay ----------------

    pub fn on_pointer_down(&mut self, event: &M::Event, target: PointerTarget) -> RelayOutcome {
        let Some(map) = self.map.as_ref() else {
            return RelayOutcome::Ignored;
        };
        if !starts_pan(event, target) {
            return RelayOutcome::Ignored;
        }
        let outcome = forward_event(map, event);
        if outcome.forwarded() {
            self.mode.panning = true;
            let flags = self.graph.interaction();
            self.graph.set_interaction(InteractionFlags {
                auto_ungrabify: true,
                ..flags
            });
        }
        outcome
    }

    pub fn on_pointer_move(&mut self, event: &M::Event) -> RelayOutcome {
        match self.map.as_ref() {
            Some(map) if self.mode.panning => forward_event(map, event),
            _ => RelayOutcome::Ignored,
        }
    }

    pub fn on_pointer_up(&mut self, event: &M::Event) -> RelayOutcome {
        if !self.mode.panning {
            return RelayOutcome::Ignored;
        }
        self.mode.panning = false;
        if let Some(snapshot) = &self.snapshot {
            let flags = self.graph.interaction();
            self.graph.set_interaction(InteractionFlags {
                auto_ungrabify: snapshot.interaction.auto_ungrabify,
                ..flags
            });
        }
        let Some(map) = self.map.as_ref() else {
            return RelayOutcome::Ignored;
        };
        let outcome = forward_event(map, event);
        self.graph.suppress_unselect();
        outcome
    }

    pub fn on_wheel(&mut self, event: &M::Event) -> RelayOutcome {
        let Some(map) = self.map.as_ref() else {
            return RelayOutcome::Ignored;
        };
        event.prevent_default();
        forward_event(map, event)
    }
}

fn is_usable(viewport: &Viewport) -> bool {
    viewport.zoom.is_finite() && viewport.zoom > 0.0 && viewport.pan.is_finite()
}
