// Names and styles shared by the browser bindings. Kept free of browser
// types so the host-side tests can include this file.

/// Name under which the handler is installed on `cytoscape('core', ...)`.
pub const EXTENSION_NAME: &str = "leaflet";

/// Class given to the map container inserted under the graph canvas.
pub const OVERLAY_CLASS: &str = "geolink-map";

// Fills the graph container and sits below the canvas layers
pub const OVERLAY_STYLE: &str =
    "position:absolute;top:0;left:0;width:100%;height:100%;z-index:0;";

// Style bypass applied to nodes carrying the hidden marker
pub const HIDDEN_STYLE_PROPERTY: &str = "display";
pub const HIDDEN_STYLE_VALUE: &str = "none";

/// Leaflet pane that receives relayed pointer and wheel events.
pub const MAP_PANE: &str = "mapPane";

/// Automatic layout used when the caller configures none.
pub const DEFAULT_LAYOUT: &str = "cose";

// Cytoscape lifecycle events observed while attached
pub const EVENT_ADD: &str = "add";
pub const EVENT_DATA: &str = "data";
pub const EVENT_DRAG_FREE: &str = "dragfree";
pub const EVENT_RESIZE: &str = "resize";
pub const EVENT_LAYOUT_START: &str = "layoutstart";
pub const EVENT_LAYOUT_STOP: &str = "layoutstop";
pub const NODE_SELECTOR: &str = "node";

// Cytoscape gesture events relayed to the map
pub const EVENT_TAP_START: &str = "tapstart";
pub const EVENT_TAP_DRAG: &str = "tapdrag";
pub const EVENT_TAP_END: &str = "tapend";

// Leaflet viewport events
pub const MAP_MOVE_START: &str = "movestart";
pub const MAP_MOVE: &str = "move";
pub const MAP_MOVE_END: &str = "moveend";

/// DOM wheel listener on the graph container. Registered non-passive.
pub const DOM_WHEEL: &str = "wheel";
