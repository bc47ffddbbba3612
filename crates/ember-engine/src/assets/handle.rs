/// Index-backed asset handle.
///
/// Implemented by the concrete id types so [`AssetCache`](super::AssetCache)
/// can hand out typed handles without knowing the asset class.
pub trait AssetId: Copy + Eq + core::hash::Hash + core::fmt::Debug {
    /// Human-readable asset class, used in error messages.
    const KIND: &'static str;

    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! asset_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Builds a handle from a raw index. Mostly useful in tests and
            /// for backends that allocate their own ids.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl AssetId for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect(concat!($kind, " index overflow")))
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

asset_id!(
    /// Opaque handle to a texture.
    TextureId,
    "texture"
);
asset_id!(
    /// Opaque handle to a font.
    FontId,
    "font"
);
asset_id!(
    /// Opaque handle to a shader program.
    ShaderId,
    "shader"
);
