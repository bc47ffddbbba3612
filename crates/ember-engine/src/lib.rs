//! Ember engine crate.
//!
//! Deferred 2D rendering: draw requests are queued during a frame, then
//! sorted and replayed into a backend once per frame.

pub mod assets;
pub mod coords;
pub mod frame;
pub mod fx;
pub mod gpu;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
