use crate::assets::FontId;
use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::{DrawCmd, Layer, RenderQueue, Source};

use super::{check_non_negative, check_scalar, check_vec};

/// Text payload.
///
/// The point `origin` of the laid-out text block (relative to its top-left)
/// is placed at `position`, and the block is rotated around it by `rotation`
/// degrees. `spacing` is extra advance added after every glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub font: FontId,
    pub text: String,
    pub position: Vec2,
    pub origin: Vec2,
    pub rotation: f32,
    pub font_size: f32,
    pub spacing: f32,
    pub color: Color,
}

impl RenderQueue {
    /// Enqueues a run of text.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: FontId,
        text: impl Into<String>,
        position: Vec2,
        origin: Vec2,
        rotation: f32,
        font_size: f32,
        spacing: f32,
        color: Color,
        source: Source,
        layer: impl Into<Layer>,
    ) {
        check_vec("draw_text", "position", position);
        check_vec("draw_text", "origin", origin);
        check_scalar("draw_text", "rotation", rotation);
        check_non_negative("draw_text", "font_size", font_size);
        check_scalar("draw_text", "spacing", spacing);

        self.push(
            source,
            layer.into(),
            DrawCmd::Text(TextCmd {
                font,
                text: text.into(),
                position,
                origin,
                rotation,
                font_size,
                spacing,
                color,
            }),
        );
    }
}
