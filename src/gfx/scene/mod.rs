//! # Scene Module
//!
//! Typed scene nodes and the showcase layout.
//!
//! - [`Scene`] - camera plus mesh, model, light and environment nodes
//! - [`Transform`] / [`SharedTransform`] - node transforms shared with animation timelines
//! - [`GpuMesh`] - uploaded vertex and index buffers
//! - [`Vertex3D`] - position, normal and texture coordinate
//!
//! ## Usage
//!
//! ```no_run
//! use vitrine::gfx::scene::Scene;
//!
//! let scene = Scene::showcase("1K", "jpg", 1200.0 / 800.0);
//! let bundle = scene.texture_bundle().unwrap();
//! let ball = scene.focal_target().unwrap();
//! ```

pub mod mesh;
pub mod node;
pub mod showcase;
pub mod vertex;

pub use mesh::{DrawMesh, GpuMesh};
pub use node::{
    EnvironmentNode, LightNode, MeshNode, ModelNode, SharedTransform, SurfaceMaterial, Transform,
};
pub use showcase::Scene;
pub use vertex::Vertex3D;
