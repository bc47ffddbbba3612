//! Small effects built on the render queue.

mod emitter;

pub use emitter::{Emitter, EmitterConfig, Particle};
