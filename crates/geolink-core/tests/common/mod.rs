// In-memory stand-ins for the graph canvas, the map and the host scheduler.
// The map uses a plain linear projection so expected positions are easy to
// compute by hand.

#![allow(dead_code)]

use fnv::FnvHashMap;
use geolink_core::*;
use glam::DVec2;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Duration;

pub const TOLERANCE: f64 = 1e-6;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_close(actual: DVec2, expected: DVec2) {
    assert!(
        actual.distance(expected) < TOLERANCE,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

// ---------------- Graph ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayHandle(pub u32);

#[derive(Clone, Debug, Default)]
pub struct FakeNode {
    pub pos: DVec2,
    pub locked: bool,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct GraphSpy {
    pub interaction: Vec<InteractionFlags>,
    pub unmounted: Vec<OverlayHandle>,
}

#[derive(Debug)]
pub struct FakeGraph {
    pub nodes: BTreeMap<NodeId, FakeNode>,
    pub viewport: Viewport,
    pub interaction: InteractionFlags,
    pub writes: usize,
    pub overlay: Option<OverlayHandle>,
    pub fail_mount: bool,
    /// Survives the graph being consumed by a failed construction.
    pub spy: Rc<RefCell<GraphSpy>>,
    pub viewport_transitions: Vec<Option<Transition>>,
    pub presets: Vec<Vec<(NodeId, DVec2)>>,
    pub layouts: Vec<(Vec<NodeId>, Option<String>)>,
    pub unselect_suppressed: usize,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            viewport: Viewport {
                zoom: 2.5,
                pan: DVec2::new(40.0, -12.0),
            },
            interaction: InteractionFlags::default(),
            writes: 0,
            overlay: None,
            fail_mount: false,
            spy: Rc::new(RefCell::new(GraphSpy::default())),
            viewport_transitions: Vec::new(),
            presets: Vec::new(),
            layouts: Vec::new(),
            unselect_suppressed: 0,
        }
    }

    pub fn with_node(mut self, id: &str, pos: DVec2) -> Self {
        self.add_node(id, pos);
        self
    }

    pub fn add_node(&mut self, id: &str, pos: DVec2) {
        self.nodes.insert(
            NodeId::from(id),
            FakeNode {
                pos,
                ..FakeNode::default()
            },
        );
    }

    pub fn node(&self, id: &str) -> &FakeNode {
        &self.nodes[&NodeId::from(id)]
    }

    pub fn pos(&self, id: &str) -> DVec2 {
        self.node(id).pos
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.node(id).classes.contains(HIDDEN_CLASS)
    }

    /// Simulates the user dragging a node.
    pub fn drag(&mut self, id: &str, pos: DVec2) {
        if let Some(node) = self.nodes.get_mut(&NodeId::from(id)) {
            node.pos = pos;
        }
    }
}

impl GraphSurface for FakeGraph {
    type Container = OverlayHandle;
    type LayoutConfig = String;

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    fn position(&self, id: &NodeId) -> Option<DVec2> {
        self.nodes.get(id).map(|n| n.pos)
    }

    fn set_position(&mut self, id: &NodeId, pos: DVec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.pos = pos;
            self.writes += 1;
        }
    }

    fn is_locked(&self, id: &NodeId) -> bool {
        self.nodes.get(id).map(|n| n.locked).unwrap_or(false)
    }

    fn set_locked(&mut self, id: &NodeId, locked: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.locked = locked;
        }
    }

    fn has_class(&self, id: &NodeId, class: &str) -> bool {
        self.nodes
            .get(id)
            .map(|n| n.classes.contains(class))
            .unwrap_or(false)
    }

    fn set_class(&mut self, id: &NodeId, class: &str, on: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            if on {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport, transition: Option<Transition>) {
        self.viewport = viewport;
        self.viewport_transitions.push(transition);
    }

    fn interaction(&self) -> InteractionFlags {
        self.interaction
    }

    fn set_interaction(&mut self, flags: InteractionFlags) {
        self.interaction = flags;
        self.spy.borrow_mut().interaction.push(flags);
    }

    fn mount_overlay(&mut self) -> SyncResult<OverlayHandle> {
        if self.fail_mount {
            return Err(SyncError::Mount("graph has no container".to_string()));
        }
        let handle = OverlayHandle(7);
        self.overlay = Some(handle);
        Ok(handle)
    }

    fn unmount_overlay(&mut self, overlay: OverlayHandle) {
        self.overlay = None;
        self.spy.borrow_mut().unmounted.push(overlay);
    }

    fn run_preset(&mut self, positions: &[(NodeId, DVec2)], _transition: Option<Transition>) {
        for (id, pos) in positions {
            if let Some(node) = self.nodes.get_mut(id) {
                if !node.locked {
                    node.pos = *pos;
                }
            }
        }
        self.presets.push(positions.to_vec());
    }

    fn run_layout(&mut self, nodes: &[NodeId], config: Option<&String>) {
        for (i, id) in nodes.iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(id) {
                if !node.locked {
                    node.pos = DVec2::new(100.0 * i as f64, 100.0);
                }
            }
        }
        self.layouts.push((nodes.to_vec(), config.cloned()));
    }

    fn suppress_unselect(&mut self) {
        self.unselect_suppressed += 1;
    }
}

// ---------------- Map ----------------

#[derive(Clone, Debug)]
pub struct MapView {
    pub center: LatLng,
    /// Pixels per degree.
    pub scale: f64,
    pub size: DVec2,
    pub fits: usize,
    pub invalidations: usize,
    /// No center or zoom set yet; projections fail.
    pub blank: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            scale: 10.0,
            size: DVec2::new(800.0, 600.0),
            fits: 0,
            invalidations: 0,
            blank: false,
        }
    }
}

impl MapView {
    pub fn project(&self, coord: LatLng) -> DVec2 {
        DVec2::new(
            (coord.lng - self.center.lng) * self.scale + self.size.x * 0.5,
            (self.center.lat - coord.lat) * self.scale + self.size.y * 0.5,
        )
    }

    pub fn unproject(&self, point: DVec2) -> LatLng {
        LatLng::new(
            self.center.lat - (point.y - self.size.y * 0.5) / self.scale,
            self.center.lng + (point.x - self.size.x * 0.5) / self.scale,
        )
    }
}

#[derive(Clone, Debug)]
pub struct FakeEvent {
    pub kind: &'static str,
    pub primary: bool,
    pub modifiers: Modifiers,
    pub in_map: bool,
    pub prevented: Rc<Cell<bool>>,
}

impl FakeEvent {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            primary: true,
            modifiers: Modifiers::default(),
            in_map: false,
            prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn inside_map(mut self) -> Self {
        self.in_map = true;
        self
    }

    pub fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

impl RelayEvent for FakeEvent {
    fn is_primary_button(&self) -> bool {
        self.primary
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

#[derive(Clone, Debug, Default)]
pub struct FakeMapConfig {
    pub view: Rc<RefCell<MapView>>,
    pub dispatched: Rc<RefCell<Vec<FakeEvent>>>,
    pub removed: Rc<Cell<bool>>,
    pub fail: bool,
    pub reject_dispatch: bool,
}

#[derive(Debug)]
pub struct FakeMap {
    pub overlay: OverlayHandle,
    pub view: Rc<RefCell<MapView>>,
    pub dispatched: Rc<RefCell<Vec<FakeEvent>>>,
    pub removed: Rc<Cell<bool>>,
    pub reject_dispatch: bool,
}

impl MapSurface for FakeMap {
    type Container = OverlayHandle;
    type Config = FakeMapConfig;
    type Event = FakeEvent;

    fn create(container: &OverlayHandle, config: &FakeMapConfig) -> SyncResult<Self> {
        if config.fail {
            return Err(SyncError::Mount("map refused container".to_string()));
        }
        Ok(Self {
            overlay: *container,
            view: config.view.clone(),
            dispatched: config.dispatched.clone(),
            removed: config.removed.clone(),
            reject_dispatch: config.reject_dispatch,
        })
    }

    fn project(&self, coord: LatLng) -> Option<DVec2> {
        let view = self.view.borrow();
        (!view.blank).then(|| view.project(coord))
    }

    fn unproject(&self, point: DVec2) -> Option<LatLng> {
        let view = self.view.borrow();
        (!view.blank).then(|| view.unproject(point))
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds, options: FitOptions) {
        let (Some(sw), Some(ne), Some(center)) =
            (bounds.south_west(), bounds.north_east(), bounds.center())
        else {
            return;
        };
        let mut view = self.view.borrow_mut();
        view.blank = false;
        view.center = center;
        let span = DVec2::new(ne.lng - sw.lng, ne.lat - sw.lat);
        let room = view.size - DVec2::splat(2.0 * options.padding_px);
        if span.x > 0.0 && span.y > 0.0 {
            view.scale = (room.x / span.x).min(room.y / span.y);
        }
        view.fits += 1;
    }

    fn invalidate_size(&mut self) {
        self.view.borrow_mut().invalidations += 1;
    }

    fn owns_target(&self, event: &FakeEvent) -> bool {
        event.in_map
    }

    fn redispatch(&self, event: &FakeEvent) -> bool {
        if self.reject_dispatch {
            return false;
        }
        self.dispatched.borrow_mut().push(event.clone().inside_map());
        true
    }

    fn remove(&mut self) {
        self.removed.set(true);
    }
}

// ---------------- Scheduler ----------------

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next: u64,
    pub frames: Vec<TaskId>,
    pub timers: Vec<(TaskId, Duration)>,
    pub canceled: Vec<TaskId>,
}

impl SchedulerLog {
    pub fn live_frames(&self) -> Vec<TaskId> {
        self.frames
            .iter()
            .filter(|id| !self.canceled.contains(id))
            .copied()
            .collect()
    }

    pub fn live_timers(&self) -> Vec<(TaskId, Duration)> {
        self.timers
            .iter()
            .filter(|(id, _)| !self.canceled.contains(id))
            .copied()
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pub log: Rc<RefCell<SchedulerLog>>,
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> TaskId {
        let mut log = self.log.borrow_mut();
        log.next += 1;
        let id = TaskId(log.next);
        log.frames.push(id);
        id
    }

    fn schedule_after(&mut self, delay: Duration) -> TaskId {
        let mut log = self.log.borrow_mut();
        log.next += 1;
        let id = TaskId(log.next);
        log.timers.push((id, delay));
        id
    }

    fn cancel(&mut self, task: TaskId) {
        self.log.borrow_mut().canceled.push(task);
    }
}

// ---------------- Fixture ----------------

pub type Handler = PositionSyncHandler<FakeGraph, FakeMap, ManualScheduler>;

/// Native coordinates the accessor reads; tests edit it to mimic data changes.
pub type CoordStore = Rc<RefCell<FnvHashMap<NodeId, LatLng>>>;

pub struct Fixture {
    pub handler: Handler,
    pub coords: CoordStore,
    pub map: FakeMapConfig,
    pub scheduler: Rc<RefCell<SchedulerLog>>,
}

impl Fixture {
    pub fn graph(&self) -> &FakeGraph {
        self.handler.graph()
    }

    pub fn project(&self, coord: LatLng) -> DVec2 {
        self.map.view.borrow().project(coord)
    }

    pub fn unproject(&self, point: DVec2) -> LatLng {
        self.map.view.borrow().unproject(point)
    }

    pub fn set_coord(&self, id: &str, coord: Option<LatLng>) {
        let mut coords = self.coords.borrow_mut();
        match coord {
            Some(c) => coords.insert(NodeId::from(id), c),
            None => coords.remove(&NodeId::from(id)),
        };
    }

    /// Pans the map by `delta` pixels and runs the whole move gesture,
    /// including the animation frame.
    pub fn pan_map(&mut self, delta: DVec2) {
        {
            let mut view = self.map.view.borrow_mut();
            let scale = view.scale;
            view.center.lng += delta.x / scale;
            view.center.lat -= delta.y / scale;
        }
        self.handler.on_map_move_start();
        self.handler.on_map_move();
        self.handler.on_map_move_end();
        let frames = self.scheduler.borrow().live_frames();
        for id in frames {
            self.handler.fire(id);
        }
    }
}

pub fn accessor_for(coords: &CoordStore) -> impl Fn(&NodeId) -> Option<LatLng> + 'static {
    let coords = coords.clone();
    move |id: &NodeId| coords.borrow().get(id).copied()
}

pub fn build(
    graph: FakeGraph,
    anchors: &[(&str, LatLng)],
    configure: impl FnOnce(SyncOptions<String>) -> SyncOptions<String>,
) -> Fixture {
    build_with_map(graph, anchors, FakeMapConfig::default(), configure)
}

pub fn build_with_map(
    graph: FakeGraph,
    anchors: &[(&str, LatLng)],
    map: FakeMapConfig,
    configure: impl FnOnce(SyncOptions<String>) -> SyncOptions<String>,
) -> Fixture {
    init_logging();
    let coords: CoordStore = Rc::new(RefCell::new(
        anchors
            .iter()
            .map(|(id, c)| (NodeId::from(*id), *c))
            .collect(),
    ));
    let scheduler = ManualScheduler::default();
    let log = scheduler.log.clone();
    let options = configure(SyncOptions::new(accessor_for(&coords)));
    let handler = Handler::new(graph, &map, scheduler, options).expect("handler attaches");
    Fixture {
        handler,
        coords,
        map,
        scheduler: log,
    }
}

pub const A: LatLng = LatLng::new(48.85, 2.35);
pub const B: LatLng = LatLng::new(51.5, -0.12);
pub const C: LatLng = LatLng::new(52.52, 13.4);

/// Three nodes: `a` at A, `b` at B, `c` without coordinates.
pub fn three_nodes() -> FakeGraph {
    FakeGraph::new()
        .with_node("a", DVec2::new(10.0, 10.0))
        .with_node("b", DVec2::new(20.0, 20.0))
        .with_node("c", DVec2::new(30.0, 30.0))
}
