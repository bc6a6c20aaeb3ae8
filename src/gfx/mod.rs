//! # Graphics Module
//!
//! Camera, geometry, scene and rendering for the showcase.
//!
//! - **Camera** ([`camera`]) - orbit camera steered by the pointer
//! - **Geometry** ([`geometry`]) - procedural sphere and plane
//! - **Scene** ([`scene`]) - typed nodes and the showcase layout
//! - **Resources** ([`resources`]) - global uniforms and GPU textures
//! - **Rendering** ([`rendering`]) - pipelines and frame rendering
//! - **UI** ([`ui`]) - imgui overlay
//!
//! [`RenderEngine`] draws a [`Scene`](scene::Scene); meshes appear once their textures
//! are uploaded.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod ui;

pub use camera::OrbitCamera;
pub use rendering::RenderEngine;
