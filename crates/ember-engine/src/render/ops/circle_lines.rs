use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{DrawCmd, Layer, RenderQueue, Source};

use super::{check_non_negative, check_vec};

/// Circle outline payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleLinesCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl RenderQueue {
    /// Enqueues a one-pixel circle outline centered at (`x`, `y`).
    pub fn draw_circle_lines(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
        source: Source,
        layer: impl Into<Layer>,
    ) {
        let center = Vec2::new(x, y);
        check_vec("draw_circle_lines", "center", center);
        check_non_negative("draw_circle_lines", "radius", radius);

        self.push(source, layer.into(), DrawCmd::CircleLines(CircleLinesCmd { center, radius, color }));
    }
}
