use crate::coords::Rect;
use crate::paint::Color;
use crate::render::{DrawCmd, Layer, RenderQueue, Source};

use super::{check_non_negative, check_rect};

/// Rectangle outline payload. The stroke lies inside `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleLinesCmd {
    pub rect: Rect,
    pub border_width: f32,
    pub color: Color,
}

impl RenderQueue {
    /// Enqueues a rectangle outline `border_width` pixels thick.
    pub fn draw_rectangle_lines(
        &mut self,
        rect: Rect,
        border_width: f32,
        color: Color,
        source: Source,
        layer: impl Into<Layer>,
    ) {
        check_rect("draw_rectangle_lines", "rect", rect);
        check_non_negative("draw_rectangle_lines", "border_width", border_width);

        self.push(
            source,
            layer.into(),
            DrawCmd::RectangleLines(RectangleLinesCmd { rect, border_width, color }),
        );
    }
}
