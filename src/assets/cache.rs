//! Reference-counted texture cache shared by everything that needs loaded textures

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use super::texture::DecodedTexture;

/// Decoded textures keyed by url
///
/// Cloning the cache clones a handle: all clones see the same entries. Textures are
/// handed out as `Arc`s so GPU upload and later bundles can share them.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    entries: Arc<RwLock<HashMap<String, Arc<DecodedTexture>>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<DecodedTexture>> {
        self.entries.read().get(url).cloned()
    }

    /// Stores `texture`, returning the shared entry (an existing one wins)
    pub fn insert(&self, texture: DecodedTexture) -> Arc<DecodedTexture> {
        self.entries
            .write()
            .entry(texture.url.clone())
            .or_insert_with(|| Arc::new(texture))
            .clone()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::request::ChannelKind;

    fn texture(url: &str, fill: u8) -> DecodedTexture {
        DecodedTexture {
            url: url.to_string(),
            channel: ChannelKind::Color,
            width: 1,
            height: 1,
            rgba: vec![fill; 4],
        }
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = AssetCache::new();
        let other = cache.clone();
        cache.insert(texture("a", 1));

        assert!(other.contains("a"));
        assert_eq!(other.get("a").unwrap().size_bytes(), 4);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = AssetCache::new();
        let first = cache.insert(texture("a", 1));
        let second = cache.insert(texture("a", 2));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get("a").unwrap().rgba[0], 1);
        assert_eq!(cache.len(), 1);
    }
}
