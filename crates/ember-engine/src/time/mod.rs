//! Frame timing.
//!
//! One `FrameClock` per frame driver; `tick()` once per frame yields the
//! `FrameTime` handed to draw callbacks.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
