use super::Vec2;

/// Size of a render target in logical pixels.
///
/// Backends map logical positions to NDC against this size; scissor rects
/// are scaled back to physical pixels with the target's scale factor.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Logical viewport of a `width` × `height` physical target at `scale`.
    #[inline]
    pub fn from_physical(width: u32, height: u32, scale: f32) -> Self {
        Self::new(width as f32 / scale, height as f32 / scale)
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
