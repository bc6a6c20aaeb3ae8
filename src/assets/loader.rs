//! Concurrent, fail-fast texture bundle loader

use std::{collections::HashMap, sync::Arc};

use futures::stream::{FuturesUnordered, StreamExt};

use super::{
    cache::AssetCache,
    progress::{ProgressState, ProgressView},
    request::{AssetBundle, AssetRequest},
    source::TextureSource,
    texture::DecodedTexture,
    AssetLoadError,
};

/// Textures of a fully resolved bundle, keyed by url
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    textures: HashMap<String, Arc<DecodedTexture>>,
}

impl TextureSet {
    pub fn get(&self, url: &str) -> Option<&Arc<DecodedTexture>> {
        self.textures.get(url)
    }

    pub fn insert(&mut self, texture: Arc<DecodedTexture>) {
        self.textures.insert(texture.url.clone(), texture);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.textures.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DecodedTexture>> {
        self.textures.values()
    }
}

/// Resolves texture bundles and publishes aggregate progress
///
/// Clones share the source, the cache and the progress state. Only one bundle should
/// be in flight at a time; a new [`request`](Self::request) takes over progress
/// reporting from the previous one.
#[derive(Clone)]
pub struct AssetLoader {
    source: Arc<dyn TextureSource>,
    cache: AssetCache,
    progress: ProgressState,
}

impl AssetLoader {
    pub fn new(source: impl TextureSource + 'static) -> Self {
        Self::with_cache(source, AssetCache::new())
    }

    pub fn with_cache(source: impl TextureSource + 'static, cache: AssetCache) -> Self {
        Self {
            source: Arc::new(source),
            cache,
            progress: ProgressState::default(),
        }
    }

    /// Read-only progress handle for indicators and render gates
    pub fn progress(&self) -> ProgressView {
        self.progress.view()
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Fetches and decodes every request of `bundle` concurrently
    ///
    /// Resolves once every request has settled. The first failure fails the whole
    /// bundle; textures decoded before that stay in the cache for later bundles.
    pub async fn request(&self, bundle: AssetBundle) -> Result<TextureSet, AssetLoadError> {
        let generation = self.progress.begin(bundle.len());
        log::info!("Loading texture bundle ({} textures)", bundle.len());

        let mut pending: FuturesUnordered<_> = bundle
            .iter()
            .enumerate()
            .map(|(index, request)| self.load_one(generation, index, request.clone()))
            .collect();

        let mut textures = TextureSet::default();
        while let Some(settled) = pending.next().await {
            match settled {
                Ok((index, texture)) => {
                    self.progress.settle(generation, index, &texture.url);
                    textures.insert(texture);
                }
                Err(error) => {
                    log::warn!("Texture bundle failed: {}", error);
                    self.progress.fail(generation, &error);
                    return Err(error);
                }
            }
        }

        self.progress.complete(generation);
        log::info!("Texture bundle ready ({} textures)", textures.len());
        Ok(textures)
    }

    async fn load_one(
        &self,
        generation: u64,
        index: usize,
        request: AssetRequest,
    ) -> Result<(usize, Arc<DecodedTexture>), AssetLoadError> {
        if let Some(cached) = self.cache.get(&request.url) {
            return Ok((index, cached));
        }

        let reporter = self.progress.reporter(generation, index);
        let bytes = self.source.fetch(&request, reporter).await?;
        let texture = DecodedTexture::decode(&request.url, request.channel, &bytes)?;
        Ok((index, self.cache.insert(texture)))
    }
}
