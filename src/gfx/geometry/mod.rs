//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the showcase needs without external model files.
//!
//! ## Supported Primitives
//!
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Plane**: Flat plane with configurable size and subdivisions
//!
//! ## Usage
//!
//! ```rust
//! use vitrine::gfx::geometry::{generate_plane, generate_sphere};
//!
//! // The showcase ball: radius 0.5, 100 x 100 segments
//! let ball = generate_sphere(0.5, 100, 100);
//!
//! // The 7 x 7 floor
//! let floor = generate_plane(7.0, 7.0, 1, 1);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v), origin at the top-left of the image
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions, normals and texture coordinates into GPU vertices
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coord: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
