use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::{DrawCmd, Layer, RenderQueue, Source};

use super::{check_rect, check_scalar, check_vec};

/// Filled rectangle payload.
///
/// The pivot `origin` (relative to the rectangle's top-left corner) is placed
/// at `rect.origin`, and the rectangle is rotated around it by `rotation`
/// degrees. With a zero origin and rotation the rectangle covers `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleCmd {
    pub rect: Rect,
    pub origin: Vec2,
    pub rotation: f32,
    pub color: Color,
}

impl RenderQueue {
    /// Enqueues a filled, optionally rotated rectangle.
    pub fn draw_rectangle(
        &mut self,
        rect: Rect,
        origin: Vec2,
        rotation: f32,
        color: Color,
        source: Source,
        layer: impl Into<Layer>,
    ) {
        check_rect("draw_rectangle", "rect", rect);
        check_vec("draw_rectangle", "origin", origin);
        check_scalar("draw_rectangle", "rotation", rotation);

        self.push(source, layer.into(), DrawCmd::Rectangle(RectangleCmd { rect, origin, rotation, color }));
    }

    /// Enqueues an axis-aligned filled rectangle.
    #[inline]
    pub fn fill_rectangle(&mut self, rect: Rect, color: Color, source: Source, layer: impl Into<Layer>) {
        self.draw_rectangle(rect, Vec2::zero(), 0.0, color, source, layer);
    }
}
