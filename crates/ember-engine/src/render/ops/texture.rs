use crate::assets::TextureId;
use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::{DrawCmd, Layer, RenderQueue, Source};

use super::{check_rect, check_scalar, check_vec};

/// Textured quad payload.
///
/// `src` is in texel coordinates. A negative width flips the sampled region
/// horizontally, a negative height flips it vertically; the sign is carried
/// through to the backend untouched. `dst`, `origin` and `rotation` follow
/// the same placement rules as [`RectangleCmd`](super::RectangleCmd).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCmd {
    pub texture: TextureId,
    pub src: Rect,
    pub dst: Rect,
    pub origin: Vec2,
    pub rotation: f32,
    pub tint: Color,
}

impl TextureCmd {
    #[inline]
    pub fn flip_x(&self) -> bool {
        self.src.size.x < 0.0
    }

    #[inline]
    pub fn flip_y(&self) -> bool {
        self.src.size.y < 0.0
    }
}

impl RenderQueue {
    /// Enqueues a region of `texture` drawn into `dst`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_texture(
        &mut self,
        texture: TextureId,
        src: Rect,
        dst: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
        source: Source,
        layer: impl Into<Layer>,
    ) {
        check_rect("draw_texture", "src", src);
        check_rect("draw_texture", "dst", dst);
        check_vec("draw_texture", "origin", origin);
        check_scalar("draw_texture", "rotation", rotation);

        self.push(
            source,
            layer.into(),
            DrawCmd::Texture(TextureCmd { texture, src, dst, origin, rotation, tint }),
        );
    }
}
