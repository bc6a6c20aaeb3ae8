//! # Vitrine Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use vitrine::prelude::*;
//!
//! let config = ShowcaseConfig::default();
//! ShowcaseApp::new(config).unwrap().run().unwrap();
//! ```

pub use crate::app::ShowcaseApp;
pub use crate::config::{ConfigError, ShowcaseConfig};

pub use crate::animation::{
    AnimationClip, AnimationError, AnimationScheduler, Easing, EntranceSlot, EntranceTimeline,
    StartToken, TargetPath, Timeline, TimelineHandle,
};
pub use crate::assets::{
    AssetBundle, AssetLoadError, AssetLoader, ChannelKind, FileTextureSource, LoadProgress,
    MaterialTextures, ProgressIndicator, ProgressView, TextureSource,
};
pub use crate::gfx::camera::{OrbitCamera, OrbitControl, PointerCameraRig, PointerSample};
pub use crate::gfx::scene::{Scene, SharedTransform, Transform};

pub use cgmath::Vector3;
