//! Global uniform bindings for camera and lighting
//!
//! One uniform block shared by every draw call of a frame. The layout MUST match
//! the `Globals` struct in `textured.wgsl`.

use crate::{
    gfx::{camera::CameraUniform, scene::LightNode},
    wgpu_utils::{binding_types, UniformBuffer},
};

/// Point lights beyond this count are ignored by the shader
pub const MAX_POINT_LIGHTS: usize = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// rgb ambient term, w unused
    ambient: [f32; 4],
    /// xyz position, w intensity
    directional: [f32; 4],
    /// xyz position, w intensity
    point_positions: [[f32; 4]; MAX_POINT_LIGHTS],
    point_colors: [[f32; 4]; MAX_POINT_LIGHTS],
}

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, lights: &[LightNode]) -> Self {
        let mut content = Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ..Self::default()
        };

        let mut points = 0;
        for light in lights {
            match *light {
                LightNode::Ambient { intensity } => {
                    content.ambient = [intensity, intensity, intensity, 0.0];
                }
                LightNode::Directional {
                    position,
                    intensity,
                    ..
                } => {
                    content.directional = [position.x, position.y, position.z, intensity];
                }
                LightNode::Point {
                    position,
                    color,
                    intensity,
                } => {
                    if points == MAX_POINT_LIGHTS {
                        log::warn!("Ignoring point light at {:?}", position);
                        continue;
                    }
                    content.point_positions[points] =
                        [position.x, position.y, position.z, intensity];
                    content.point_colors[points] = [color[0], color[1], color[2], 1.0];
                    points += 1;
                }
            }
        }

        content
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Bind group 0: the global uniform block
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Bind Group Layout"),
            entries: &[binding_types::entry(0, binding_types::uniform())],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        Self { layout, bind_group }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
