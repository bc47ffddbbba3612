//! Asset handles and name-keyed caches.
//!
//! The render queue only ever sees the opaque ids defined here. Resolving a
//! name to an id happens through [`AssetCache::id`] before an instruction is
//! built, so a missing asset is reported at acquisition time.

mod cache;
mod error;
mod handle;
mod texture;

pub use cache::AssetCache;
pub use error::AssetError;
pub use handle::{AssetId, FontId, ShaderId, TextureId};
pub use texture::TextureData;
