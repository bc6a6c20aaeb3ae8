//! # Assets Module
//!
//! Asynchronous texture loading with aggregate progress reporting.
//!
//! - [`AssetBundle`] - unique texture requests resolved or failed together
//! - [`AssetLoader`] - issues every request concurrently, fails fast, caches results
//! - [`ProgressView`] - per-frame snapshots of [`LoadProgress`]
//! - [`ProgressIndicator`] - the `"<percent>%"` overlay
//!
//! ## Usage
//!
//! ```no_run
//! use vitrine::assets::{AssetBundle, AssetLoader, ChannelKind, FileTextureSource, MaterialTextures};
//!
//! let loader = AssetLoader::new(FileTextureSource::new("."));
//! let bundle = AssetBundle::new()
//!     .with_material(&MaterialTextures::leather("1K", "jpg"), &ChannelKind::SURFACE)
//!     .unwrap();
//!
//! let progress = loader.progress();
//! let textures = pollster::block_on(loader.request(bundle)).unwrap();
//! assert_eq!(progress.snapshot().percent, 100);
//! ```

pub mod cache;
pub mod indicator;
pub mod loader;
pub mod progress;
pub mod request;
pub mod source;
pub mod texture;

pub use cache::AssetCache;
pub use indicator::ProgressIndicator;
pub use loader::{AssetLoader, TextureSet};
pub use progress::{ByteProgress, LoadPhase, LoadProgress, ProgressView};
pub use request::{AssetBundle, AssetRequest, ChannelKind, MaterialTextures};
pub use source::{FileTextureSource, TextureSource};
pub use texture::DecodedTexture;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetLoadError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },
    /// A bundle may not request the same url twice
    #[error("duplicate texture request: {0}")]
    DuplicateUrl(String),
    #[error("fetch of {0} was abandoned")]
    Cancelled(String),
}
