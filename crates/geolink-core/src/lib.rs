//! Platform-free core of geolink: keeps graph nodes pinned to geographic
//! coordinates on a map.
//!
//! The graph canvas, the map and the host's timing facilities are reached
//! only through the traits in [`surface`] and [`scheduler`], so the whole
//! handler runs on the host in tests and behind `wasm-bindgen` in the browser.

pub mod anchor;
pub mod constants;
pub mod error;
pub mod geo;
pub mod handler;
pub mod options;
pub mod relay;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod sync;

pub use anchor::*;
pub use constants::*;
pub use error::*;
pub use geo::*;
pub use handler::*;
pub use options::*;
pub use relay::*;
pub use scheduler::*;
pub use state::*;
pub use surface::*;
pub use sync::*;
