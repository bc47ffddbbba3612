use crate::paint::{linear_to_srgb, srgb_to_linear, Color};

use super::AssetError;

/// CPU-side texture pixels: tightly packed RGBA8, sRGB-encoded color,
/// straight alpha, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decodes PNG / JPEG / BMP bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| AssetError::Decode {
            kind: "texture",
            reason: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self { width, height, rgba: rgba.into_raw() })
    }

    /// Uniformly colored texture.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let (r, g, b, a) = straight_u8(color);
        let rgba = [r, g, b, a].repeat((width * height) as usize);
        Self { width, height, rgba }
    }

    /// Two-color checkerboard with `cell`-pixel squares.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: Color, b: Color) -> Self {
        let cell = cell.max(1);
        let ca = straight_u8(a);
        let cb = straight_u8(b);
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let (r, g, bl, al) = if ((x / cell) + (y / cell)) % 2 == 0 { ca } else { cb };
                rgba.extend_from_slice(&[r, g, bl, al]);
            }
        }
        Self { width, height, rgba }
    }

    /// Returns the pixels with alpha premultiplied, as the GPU backend blends them.
    ///
    /// The multiply happens in linear space; the result is re-encoded so an
    /// `Rgba8UnormSrgb` texture decodes it to linear premultiplied values.
    pub fn premultiplied(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| match px[3] {
                255 => [px[0], px[1], px[2], 255],
                0 => [0, 0, 0, 0],
                alpha => {
                    let a = alpha as f32 / 255.0;
                    let mul = |c: u8| to_u8(linear_to_srgb(srgb_to_linear(c as f32 / 255.0) * a));
                    [mul(px[0]), mul(px[1]), mul(px[2]), alpha]
                }
            })
            .collect()
    }
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Un-premultiplies a linear `Color` and encodes it as straight sRGB bytes.
fn straight_u8(color: Color) -> (u8, u8, u8, u8) {
    let a = color.a.clamp(0.0, 1.0);
    let un = |c: f32| if a <= 0.0 { 0.0 } else { (c / a).clamp(0.0, 1.0) };
    let enc = |c: f32| to_u8(linear_to_srgb(un(c)));
    (enc(color.r), enc(color.g), enc(color.b), to_u8(a))
}
