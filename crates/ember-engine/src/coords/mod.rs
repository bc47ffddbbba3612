//! Coordinate and geometry types shared by the render queue, backends and UI.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Entity-space coordinates are mapped to screen space by `render::Camera2D`.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
