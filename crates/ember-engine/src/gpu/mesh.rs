//! CPU tessellation of backend calls into batched triangles.

use core::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::assets::{ShaderId, TextureId};
use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::Affine2;

/// Interleaved vertex (32 bytes).
///
///  offset  0  pos    [f32; 2]   loc 0   logical screen pixels
///  offset  8  uv     [f32; 2]   loc 1
///  offset 16  color  [f32; 4]   loc 2   linear premultiplied
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Texture a batch samples from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TextureSlot {
    /// Shared atlas holding glyphs and the white texel used by solid shapes.
    Atlas,
    Texture(TextureId),
}

/// Pipeline state shared by every triangle in a batch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct BatchKey {
    pub texture: TextureSlot,
    pub shader: Option<ShaderId>,
    /// Scissor rect in logical screen pixels; `None` = whole target.
    pub clip: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Batch {
    pub key: BatchKey,
    pub indices: Range<u32>,
}

/// Accumulates triangles for one frame.
///
/// Tracks the bracket state the queue replays: the active camera transform,
/// the scissor stack (each entry already intersected with its parent) and
/// the shader stack. Consecutive quads with the same state share a batch.
#[derive(Debug)]
pub(crate) struct MeshBuilder {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub batches: Vec<Batch>,

    transform: Affine2,
    clip_stack: Vec<Rect>,
    shader_stack: Vec<ShaderId>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
            transform: Affine2::IDENTITY,
            clip_stack: Vec::new(),
            shader_stack: Vec::new(),
        }
    }
}

impl MeshBuilder {
    /// Drops recorded geometry, keeping capacity.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.transform = Affine2::IDENTITY;
        if !self.clip_stack.is_empty() || !self.shader_stack.is_empty() {
            log::warn!(
                "mesh reset with {} scissor / {} shader scopes still open",
                self.clip_stack.len(),
                self.shader_stack.len()
            );
        }
        self.clip_stack.clear();
        self.shader_stack.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
    }

    /// Begins a scissor region intersected with the current one.
    pub fn push_clip(&mut self, rect: Rect) {
        let rect = rect.normalized();
        let effective = match self.clip_stack.last() {
            None => rect,
            // Disjoint regions collapse to a zero-area rect so the draws are skipped.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    pub fn push_shader(&mut self, shader: ShaderId) {
        self.shader_stack.push(shader);
    }

    pub fn pop_shader(&mut self) {
        debug_assert!(!self.shader_stack.is_empty(), "pop_shader called without matching push_shader");
        self.shader_stack.pop();
    }

    /// Adds one quad. `corners` are local (pre-transform) positions in
    /// top-left, top-right, bottom-right, bottom-left order.
    pub fn quad(&mut self, texture: TextureSlot, corners: [Vec2; 4], uvs: [[f32; 2]; 4], color: Color) {
        let key = BatchKey {
            texture,
            shader: self.shader_stack.last().copied(),
            clip: self.clip_stack.last().copied(),
        };

        let base = self.vertices.len() as u32;
        let color = color.to_array();
        for (corner, uv) in corners.into_iter().zip(uvs) {
            let p = self.transform.apply(corner);
            self.vertices.push(Vertex { pos: [p.x, p.y], uv, color });
        }

        let start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = self.indices.len() as u32;

        match self.batches.last_mut() {
            Some(batch) if batch.key == key && batch.indices.end == start => batch.indices.end = end,
            _ => self.batches.push(Batch { key, indices: start..end }),
        }
    }

    /// Adds an untextured quad sampling the atlas white texel at `white_uv`.
    pub fn solid_quad(&mut self, corners: [Vec2; 4], white_uv: [f32; 2], color: Color) {
        self.quad(TextureSlot::Atlas, corners, [white_uv; 4], color);
    }
}

/// Corners of `dst` after placing pivot `origin` at `dst.origin` and rotating
/// by `rotation` degrees around it.
pub(crate) fn placed_corners(dst: Rect, origin: Vec2, rotation: f32) -> [Vec2; 4] {
    let size = dst.normalized().size;
    let local = [
        Vec2::new(0.0, 0.0),
        Vec2::new(size.x, 0.0),
        Vec2::new(size.x, size.y),
        Vec2::new(0.0, size.y),
    ];
    local.map(|c| (c - origin).rotated(rotation) + dst.origin)
}

/// Axis-aligned corners of a rect.
#[inline]
pub(crate) fn rect_corners(r: Rect) -> [Vec2; 4] {
    placed_corners(r.normalized(), Vec2::zero(), 0.0)
}

/// Texture coordinates for a texel-space source rect.
///
/// A negative width/height keeps `src.origin` as the anchor and mirrors the
/// sampled span: `x .. x + |w|` is read right-to-left.
pub(crate) fn source_uvs(src: Rect, tex_w: f32, tex_h: f32) -> [[f32; 2]; 4] {
    let (w, h) = (src.size.x.abs(), src.size.y.abs());
    let (mut u0, mut u1) = (src.origin.x / tex_w, (src.origin.x + w) / tex_w);
    let (mut v0, mut v1) = (src.origin.y / tex_h, (src.origin.y + h) / tex_h);
    if src.size.x < 0.0 {
        core::mem::swap(&mut u0, &mut u1);
    }
    if src.size.y < 0.0 {
        core::mem::swap(&mut v0, &mut v1);
    }
    [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]
}

/// The four edge strips of a rectangle outline, stroke inside the rect.
pub(crate) fn outline_strips(rect: Rect, width: f32) -> [Rect; 4] {
    let r = rect.normalized();
    let w = width.min(r.size.x * 0.5).min(r.size.y * 0.5).max(0.0);
    let (x, y, rw, rh) = (r.origin.x, r.origin.y, r.size.x, r.size.y);
    [
        Rect::new(x, y, rw, w),                      // top
        Rect::new(x, y + rh - w, rw, w),             // bottom
        Rect::new(x, y + w, w, rh - 2.0 * w),        // left
        Rect::new(x + rw - w, y + w, w, rh - 2.0 * w), // right
    ]
}

/// Segment count for a circle outline; grows with the radius.
pub(crate) fn circle_segments(radius: f32) -> usize {
    ((radius * 0.75).ceil() as usize).clamp(12, 128)
}

/// Ring quads approximating a circle outline of `thickness` pixels.
pub(crate) fn ring_quads(center: Vec2, radius: f32, thickness: f32) -> Vec<[Vec2; 4]> {
    let n = circle_segments(radius);
    let inner = (radius - thickness * 0.5).max(0.0);
    let outer = radius + thickness * 0.5;
    let point = |i: usize, r: f32| {
        let a = (i as f32 / n as f32) * core::f32::consts::TAU;
        center + Vec2::new(a.cos(), a.sin()) * r
    };
    (0..n)
        .map(|i| [point(i, outer), point(i + 1, outer), point(i + 1, inner), point(i, inner)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_UV: [f32; 2] = [0.5, 0.5];

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn unit(x: f32) -> [Vec2; 4] {
        rect_corners(Rect::new(x, 0.0, 1.0, 1.0))
    }

    #[test]
    fn same_state_quads_share_a_batch() {
        let mut m = MeshBuilder::default();
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        m.solid_quad(unit(1.0), WHITE_UV, Color::white());
        assert_eq!(m.batches.len(), 1);
        assert_eq!(m.batches[0].indices, 0..12);
        assert_eq!(m.vertices.len(), 8);
    }

    #[test]
    fn texture_change_splits_batches_in_order() {
        let mut m = MeshBuilder::default();
        let tex = TextureSlot::Texture(TextureId::from_raw(3));
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        m.quad(tex, unit(1.0), [[0.0, 0.0]; 4], Color::white());
        m.solid_quad(unit(2.0), WHITE_UV, Color::white());

        let textures: Vec<_> = m.batches.iter().map(|b| b.key.texture).collect();
        assert_eq!(textures, [TextureSlot::Atlas, tex, TextureSlot::Atlas]);
        assert_eq!(m.batches[2].indices, 12..18);
    }

    #[test]
    fn nested_clips_intersect_and_restore() {
        let mut m = MeshBuilder::default();
        m.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        m.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        m.pop_clip();
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        m.pop_clip();

        assert_eq!(m.batches[0].key.clip, Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(m.batches[1].key.clip, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn disjoint_clip_collapses_to_zero_area() {
        let mut m = MeshBuilder::default();
        m.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        m.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        assert!(m.batches[0].key.clip.is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn shader_is_part_of_batch_state() {
        let mut m = MeshBuilder::default();
        m.push_shader(ShaderId::from_raw(4));
        m.solid_quad(unit(0.0), WHITE_UV, Color::white());
        m.pop_shader();
        m.solid_quad(unit(1.0), WHITE_UV, Color::white());
        assert_eq!(m.batches[0].key.shader, Some(ShaderId::from_raw(4)));
        assert_eq!(m.batches[1].key.shader, None);
    }

    #[test]
    fn transform_applies_to_vertices() {
        let mut m = MeshBuilder::default();
        m.set_transform(Affine2 { m: [[2.0, 0.0, 10.0], [0.0, 2.0, 20.0]] });
        m.solid_quad(unit(1.0), WHITE_UV, Color::white());
        assert_eq!(m.vertices[0].pos, [12.0, 20.0]);
        assert_eq!(m.vertices[2].pos, [14.0, 22.0]);
    }

    #[test]
    fn placed_corners_pivot_lands_on_dst_origin() {
        let dst = Rect::new(100.0, 100.0, 20.0, 10.0);
        let origin = Vec2::new(10.0, 5.0);
        let c = placed_corners(dst, origin, 90.0);
        // Unrotated top-left is (-10, -5) from the pivot; a quarter turn maps it to (5, -10).
        assert!(close(c[0], Vec2::new(105.0, 90.0)), "{:?}", c[0]);
        let center = (c[0] + c[2]) * 0.5;
        assert!(close(center, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn source_uvs_mirror_on_negative_extent() {
        let plain = source_uvs(Rect::new(0.0, 0.0, 16.0, 16.0), 32.0, 32.0);
        let flipped = source_uvs(Rect::new(0.0, 0.0, -16.0, 16.0), 32.0, 32.0);
        assert_eq!(plain[0], [0.0, 0.0]);
        assert_eq!(plain[1], [0.5, 0.0]);
        assert_eq!(flipped[0], [0.5, 0.0]);
        assert_eq!(flipped[1], [0.0, 0.0]);

        let v_flip = source_uvs(Rect::new(0.0, 8.0, 16.0, -8.0), 32.0, 32.0);
        assert_eq!(v_flip[0], [0.0, 0.5]);
        assert_eq!(v_flip[3], [0.0, 0.25]);
    }

    #[test]
    fn outline_strips_stay_inside_rect() {
        let strips = outline_strips(Rect::new(0.0, 0.0, 10.0, 6.0), 2.0);
        assert_eq!(strips[0], Rect::new(0.0, 0.0, 10.0, 2.0));
        assert_eq!(strips[1], Rect::new(0.0, 4.0, 10.0, 2.0));
        assert_eq!(strips[2], Rect::new(0.0, 2.0, 2.0, 2.0));
        assert_eq!(strips[3], Rect::new(8.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn ring_closes_on_itself() {
        let quads = ring_quads(Vec2::new(5.0, 5.0), 10.0, 1.0);
        assert_eq!(quads.len(), circle_segments(10.0));
        let first = quads[0][0];
        let last = quads[quads.len() - 1][1];
        assert!(close(first, last));
    }
}
