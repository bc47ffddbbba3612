//! wgpu backend for the render queue.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.
//! - Colors and texels are premultiplied; blending is `One, OneMinusSrcAlpha`.

mod atlas;
mod backend;
mod common;
mod ctx;
mod device;
mod mesh;

pub use backend::GpuBackend;
pub use ctx::{RenderCtx, RenderTarget};
pub use device::{Gpu, GpuInit, OffscreenTarget};
