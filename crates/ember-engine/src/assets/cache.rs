use std::collections::HashMap;

use super::{AssetError, AssetId};

/// Name-keyed asset store handing out typed ids.
///
/// Ids are dense indices into the store and stay valid for the cache's
/// lifetime. Re-inserting an existing name replaces the value in place and
/// returns the original id, so instructions already holding that id pick up
/// the new asset next frame.
#[derive(Debug)]
pub struct AssetCache<I: AssetId, T> {
    by_name: HashMap<String, I>,
    entries: Vec<(String, T)>,
}

impl<I: AssetId, T> AssetCache<I, T> {
    pub fn new() -> Self {
        Self { by_name: HashMap::new(), entries: Vec::new() }
    }

    /// Stores `value` under `name` and returns its id.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> I {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            log::debug!("replacing {} '{}'", I::KIND, name);
            self.entries[id.index()].1 = value;
            return id;
        }

        let id = I::from_index(self.entries.len());
        self.by_name.insert(name.clone(), id);
        self.entries.push((name, value));
        id
    }

    /// Resolves `name` to its id.
    pub fn id(&self, name: &str) -> Result<I, AssetError> {
        self.by_name.get(name).copied().ok_or_else(|| AssetError::NotFound {
            kind: I::KIND,
            name: name.to_string(),
        })
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.entries.get(id.index()).map(|(_, v)| v)
    }

    /// Name the asset was registered under.
    #[inline]
    pub fn name(&self, id: I) -> Option<&str> {
        self.entries.get(id.index()).map(|(n, _)| n.as_str())
    }

    /// Iterates `(id, value)` pairs in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.entries.iter_mut().enumerate().map(|(i, (_, v))| (I::from_index(i), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: AssetId, T> Default for AssetCache<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{FontId, TextureId};

    #[test]
    fn insert_hands_out_dense_ids() {
        let mut cache: AssetCache<TextureId, u8> = AssetCache::new();
        let a = cache.insert("a", 1);
        let b = cache.insert("b", 2);
        assert_eq!(a.raw(), 0);
        assert_eq!(b.raw(), 1);
        assert_eq!(cache.get(b), Some(&2));
        assert_eq!(cache.name(a), Some("a"));
    }

    #[test]
    fn reinsert_replaces_and_keeps_id() {
        let mut cache: AssetCache<TextureId, &str> = AssetCache::new();
        let first = cache.insert("hero", "old");
        let second = cache.insert("hero", "new");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(first), Some(&"new"));
    }

    #[test]
    fn missing_name_is_reported_with_kind() {
        let cache: AssetCache<FontId, ()> = AssetCache::new();
        let err = cache.id("mono").unwrap_err();
        assert_eq!(err, AssetError::NotFound { kind: "font", name: "mono".into() });
        assert_eq!(err.to_string(), "font 'mono' is not loaded");
    }
}
