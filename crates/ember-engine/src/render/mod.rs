//! Deferred render-instruction queue.
//!
//! Responsibilities:
//! - collect draw requests issued anywhere during a frame, without executing them
//! - capture shader / scissor mode scopes as nested instruction lists
//! - at end of frame, partition by [`Source`], sort each partition by
//!   [`SortKey`], replay into a [`Backend`] and reset
//!
//! Per-operation payloads and their enqueue helpers live under `render::ops`,
//! one file per operation.

mod backend;
mod camera;
mod flush;
mod instruction;
mod layer;
mod ops;
mod queue;
mod source;
mod stats;

pub use backend::{Backend, Call, RecordedCall, RecordingBackend};
pub use camera::{Affine2, Camera2D};
pub use instruction::{DrawCmd, Instruction};
pub use layer::{Layer, SortKey};
pub use ops::{
    CircleLinesCmd, RectangleCmd, RectangleLinesCmd, ScissorModeCmd, ShaderModeCmd, TextCmd,
    TextureCmd,
};
pub use queue::RenderQueue;
pub use source::Source;
pub use stats::FrameStats;
