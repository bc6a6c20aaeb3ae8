//! # Primitive Shape Generation
//!
//! All shapes are generated Y-up with outward normals and texture coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere centered at the origin
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments (minimum 3)
/// * `height_segments` - Number of latitude segments (minimum 2)
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let v = lat as f32 / lat_segs as f32;
        let theta = v * PI; // 0 at the north pole
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let u = long as f32 / long_segs as f32;
            let phi = u * 2.0 * PI;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [-sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // Skip the degenerate triangles at the poles
            if lat != 0 {
                data.indices.extend_from_slice(&[first, second, first + 1]);
            }
            if lat != lat_segs - 1 {
                data.indices.extend_from_slice(&[first + 1, second, second + 1]);
            }
        }
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// Rotate by -π/2 about X to lay it down as a floor facing +Y.
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Subdivisions along X
/// * `height_segments` - Subdivisions along Y
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (0.5 - v) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, v]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}
