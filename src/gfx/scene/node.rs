//! Typed scene nodes
//!
//! Transforms are shared (`Rc<RefCell<_>>`) so animation timelines can hold a weak
//! reference to the same node the renderer draws.

use std::{cell::RefCell, rc::Rc};

use cgmath::{Matrix4, Rad, Vector3};

use crate::{
    assets::{ChannelKind, MaterialTextures, TextureSet},
    gfx::geometry::GeometryData,
};

/// Position, Euler rotation (radians, XYZ order) and scale of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Model matrix, `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn shared(self) -> SharedTransform {
        Rc::new(RefCell::new(self))
    }
}

pub type SharedTransform = Rc<RefCell<Transform>>;

/// Texture-mapped surface; `displacement_scale` 0 keeps displacement maps loaded but flat
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub textures: MaterialTextures,
    pub channels: Vec<ChannelKind>,
    pub displacement_scale: f32,
}

impl SurfaceMaterial {
    pub fn new(textures: MaterialTextures) -> Self {
        Self {
            textures,
            channels: ChannelKind::SURFACE.to_vec(),
            displacement_scale: 0.0,
        }
    }

    pub fn urls(&self) -> impl Iterator<Item = String> + '_ {
        self.channels
            .iter()
            .map(|channel| self.textures.url(*channel))
    }

    /// True once every channel the material samples is present in `textures`
    pub fn is_ready(&self, textures: &TextureSet) -> bool {
        self.urls().all(|url| textures.contains(&url))
    }
}

/// Renderable primitive mesh with a textured surface
#[derive(Debug)]
pub struct MeshNode {
    pub name: String,
    pub geometry: GeometryData,
    pub transform: SharedTransform,
    pub material: SurfaceMaterial,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn new(
        name: &str,
        geometry: GeometryData,
        transform: Transform,
        material: SurfaceMaterial,
    ) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            transform: transform.shared(),
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}

/// Externally authored model referenced by path; its content is not part of the showcase
#[derive(Debug)]
pub struct ModelNode {
    pub name: String,
    pub source: String,
    pub transform: SharedTransform,
    pub cast_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightNode {
    Ambient {
        intensity: f32,
    },
    Directional {
        position: Vector3<f32>,
        intensity: f32,
        cast_shadow: bool,
        shadow_map_size: u32,
    },
    Point {
        position: Vector3<f32>,
        color: [f32; 3],
        intensity: f32,
    },
}

/// Solid-colour backdrop sphere seen from the inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentNode {
    /// sRGB colour
    pub color: [f32; 3],
    pub radius: f32,
}

impl EnvironmentNode {
    /// Parses `#rrggbb`; anything else yields black
    pub fn from_hex(hex: &str, radius: f32) -> Self {
        let digits = hex.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .map(|value| value as f32 / 255.0)
                .unwrap_or(0.0)
        };
        let color = if digits.len() == 6 {
            [channel(0..2), channel(2..4), channel(4..6)]
        } else {
            log::warn!("Invalid environment colour {:?}, using black", hex);
            [0.0; 3]
        };
        Self { color, radius }
    }

    /// Colour in linear space for clearing an sRGB render target
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.color.map(srgb_to_linear);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}
