//! Vitrine
//!
//! An interactive 3D product showcase built on wgpu and winit: a pointer-driven
//! orbit camera, a scripted entrance animation and asynchronous texture loading
//! with a progress overlay.

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod gfx;
pub mod prelude;
pub mod wgpu_utils;

pub use app::ShowcaseApp;
pub use config::ShowcaseConfig;
