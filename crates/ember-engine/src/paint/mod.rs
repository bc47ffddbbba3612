//! Color model shared by the render queue, backends and UI.
//!
//! `Color` is linear. Texture bytes are sRGB-encoded and sampled through
//! `*Srgb` formats, so the GPU decodes them to the same space.

mod color;

pub use color::{linear_to_srgb, srgb_to_linear, Color};
