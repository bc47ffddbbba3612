//! Typed payloads and enqueue helpers, one module per operation.
//!
//! Every helper validates its geometry and panics on non-finite or negative
//! values where the operation needs them; a bad value here is a caller defect
//! and would otherwise surface as a silently wrong frame.

mod circle_lines;
mod rectangle;
mod rectangle_lines;
mod scope;
mod text;
mod texture;

pub use circle_lines::CircleLinesCmd;
pub use rectangle::RectangleCmd;
pub use rectangle_lines::RectangleLinesCmd;
pub use scope::{ScissorModeCmd, ShaderModeCmd};
pub use text::TextCmd;
pub use texture::TextureCmd;

use crate::coords::{Rect, Vec2};

#[inline]
#[track_caller]
fn check_rect(op: &str, what: &str, r: Rect) {
    assert!(r.is_finite(), "{op}: {what} must be finite, got {r:?}");
}

#[inline]
#[track_caller]
fn check_vec(op: &str, what: &str, v: Vec2) {
    assert!(v.is_finite(), "{op}: {what} must be finite, got {v:?}");
}

#[inline]
#[track_caller]
fn check_scalar(op: &str, what: &str, v: f32) {
    assert!(v.is_finite(), "{op}: {what} must be finite, got {v}");
}

#[inline]
#[track_caller]
fn check_non_negative(op: &str, what: &str, v: f32) {
    assert!(v.is_finite() && v >= 0.0, "{op}: {what} must be finite and >= 0, got {v}");
}
