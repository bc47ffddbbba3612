use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

pub(crate) const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs
const WHITE_BLOCK: u32 = 4; // reserved opaque block in the top-left corner

/// Atlas region in normalized texture coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct AtlasRegion {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// CPU-side RGBA atlas shared by glyphs and solid fills.
///
/// Shelf packing; glyph coverage is stored as premultiplied white
/// (`c, c, c, c`) so the same sampler path serves text and images. A small
/// opaque block in the corner gives solid shapes a white texel to sample,
/// which keeps rectangles, outlines and text in one batch.
///
/// The GPU copy is refreshed from `pixels` whenever `dirty` is set.
pub(crate) struct GlyphAtlas {
    size: u32,
    pixels: Vec<u8>,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
    dirty: bool,
    glyphs: HashMap<GlyphRasterConfig, AtlasRegion>,
}

impl GlyphAtlas {
    pub fn new(size: u32) -> Self {
        let mut atlas = Self {
            size,
            pixels: vec![0; (size * size * 4) as usize],
            cursor_x: WHITE_BLOCK + GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: WHITE_BLOCK,
            full: false,
            dirty: true,
            glyphs: HashMap::new(),
        };
        for y in 0..WHITE_BLOCK {
            for x in 0..WHITE_BLOCK {
                atlas.put(x, y, 255);
            }
        }
        atlas
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// UV at the center of the white block.
    #[inline]
    pub fn white_uv(&self) -> [f32; 2] {
        let c = WHITE_BLOCK as f32 * 0.5 / self.size as f32;
        [c, c]
    }

    #[inline]
    pub fn glyph(&self, key: &GlyphRasterConfig) -> Option<AtlasRegion> {
        self.glyphs.get(key).copied()
    }

    /// Returns `true` once and clears the flag; the caller uploads `pixels`.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Forces a full re-upload, e.g. after the GPU texture was recreated.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stores a rasterized glyph and returns its region.
    ///
    /// Returns `None` when the atlas is out of space; the glyph is then
    /// skipped (warned once).
    pub fn insert_glyph(
        &mut self,
        key: GlyphRasterConfig,
        coverage: &[u8],
        w: u32,
        h: u32,
    ) -> Option<AtlasRegion> {
        if let Some(region) = self.glyphs.get(&key) {
            return Some(*region);
        }
        let (gx, gy) = self.allocate(w, h)?;

        for row in 0..h {
            for col in 0..w {
                let c = coverage[(row * w + col) as usize];
                self.put(gx + col, gy + row, c);
            }
        }

        let s = self.size as f32;
        let region = AtlasRegion {
            uv_min: [gx as f32 / s, gy as f32 / s],
            uv_max: [(gx + w) as f32 / s, (gy + h) as f32 / s],
        };
        self.glyphs.insert(key, region);
        self.dirty = true;
        Some(region)
    }

    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size || w + 2 * GLYPH_PADDING > self.size {
            log::warn!(
                "glyph atlas is full ({0}×{0}); some glyphs will not be rendered",
                self.size
            );
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, coverage: u8) {
        let i = ((y * self.size + x) * 4) as usize;
        self.pixels[i..i + 4].copy_from_slice(&[coverage; 4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(glyph_index: u16) -> GlyphRasterConfig {
        GlyphRasterConfig { glyph_index, px: 16.0, font_hash: 1 }
    }

    #[test]
    fn white_block_is_opaque() {
        let atlas = GlyphAtlas::new(64);
        assert_eq!(&atlas.pixels()[0..4], &[255, 255, 255, 255]);
        let uv = atlas.white_uv();
        assert_eq!(uv, [2.0 / 64.0, 2.0 / 64.0]);
    }

    #[test]
    fn glyphs_are_packed_without_overlap() {
        let mut atlas = GlyphAtlas::new(64);
        let a = atlas.insert_glyph(key(1), &[10; 6], 3, 2).unwrap();
        let b = atlas.insert_glyph(key(2), &[20; 6], 3, 2).unwrap();
        assert!(a.uv_max[0] <= b.uv_min[0]);
        assert_eq!(a.uv_min[1], b.uv_min[1]);
    }

    #[test]
    fn repeated_glyph_reuses_region() {
        let mut atlas = GlyphAtlas::new(64);
        let a = atlas.insert_glyph(key(7), &[1; 4], 2, 2).unwrap();
        assert!(atlas.take_dirty());
        let again = atlas.insert_glyph(key(7), &[1; 4], 2, 2).unwrap();
        assert_eq!(a, again);
        assert!(!atlas.take_dirty());
    }

    #[test]
    fn coverage_is_stored_premultiplied() {
        let mut atlas = GlyphAtlas::new(16);
        let r = atlas.insert_glyph(key(1), &[128], 1, 1).unwrap();
        let x = (r.uv_min[0] * 16.0) as u32;
        let y = (r.uv_min[1] * 16.0) as u32;
        let i = ((y * 16 + x) * 4) as usize;
        assert_eq!(&atlas.pixels()[i..i + 4], &[128; 4]);
    }

    #[test]
    fn full_atlas_refuses_new_glyphs() {
        let mut atlas = GlyphAtlas::new(16);
        assert!(atlas.insert_glyph(key(1), &[0; 400], 20, 20).is_none());
        assert!(atlas.insert_glyph(key(2), &[0; 1], 1, 1).is_none());
    }
}
