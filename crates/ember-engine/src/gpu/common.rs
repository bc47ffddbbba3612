//! Shared GPU types and helpers.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Viewport};

pub(super) const PRELUDE_WGSL: &str = include_str!("shaders/prelude.wgsl");
pub(super) const SPRITE_FS_WGSL: &str = include_str!("shaders/sprite_fs.wgsl");

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Minimum binding size of the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

/// Converts a logical clip rect to a physical scissor rect `(x, y, w, h)`.
///
/// `None` clip means the whole viewport. Returns `None` for a zero-area
/// result; the batch is then skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.width * scale).max(1.0) as u32;
    let phys_h = (viewport.height * scale).max(1.0) as u32;

    let Some(r) = clip else {
        return Some((0, 0, phys_w, phys_h));
    };

    let to_px = |v: f32, limit: u32| ((v * scale).max(0.0) as u32).min(limit);
    let x0 = to_px(r.origin.x, phys_w);
    let y0 = to_px(r.origin.y, phys_h);
    let x1 = to_px(r.origin.x + r.size.x, phys_w);
    let y1 = to_px(r.origin.y + r.size.y, phys_h);

    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
    if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_viewport() {
        let s = logical_clip_to_scissor(None, Viewport::new(100.0, 50.0), 2.0);
        assert_eq!(s, Some((0, 0, 200, 100)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let clip = Rect::new(-10.0, 10.0, 60.0, 100.0);
        let s = logical_clip_to_scissor(Some(clip), Viewport::new(100.0, 50.0), 2.0);
        assert_eq!(s, Some((0, 20, 100, 80)));
    }

    #[test]
    fn empty_clip_is_skipped() {
        let clip = Rect::new(10.0, 10.0, 0.0, 5.0);
        assert!(logical_clip_to_scissor(Some(clip), Viewport::new(100.0, 50.0), 1.0).is_none());
    }
}
