//! WGPU-based rendering engine for the showcase
//!
//! Draws textured meshes over the environment colour, then hands the frame to an
//! optional UI overlay callback. A mesh is drawn only once every texture its
//! material samples has been uploaded.

use std::{collections::HashMap, sync::Arc};
use wgpu::TextureFormat;

use crate::{
    assets::{ChannelKind, TextureSet},
    gfx::{
        resources::{GlobalBindings, GlobalUBO, GlobalUBOContent, TextureResource},
        scene::{DrawMesh, GpuMesh, MeshNode, Scene},
    },
    wgpu_utils::{binding_types, UniformBuffer},
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const TEXTURED_PIPELINE: &str = "Textured";

/// Per-mesh uniform block; matches `MeshUniform` in `textured.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    model: [[f32; 4]; 4],
    /// x: displacement scale
    params: [f32; 4],
}

impl MeshUniform {
    pub fn new(node: &MeshNode) -> Self {
        Self {
            model: node.transform.borrow().matrix().into(),
            params: [node.material.displacement_scale, 0.0, 0.0, 0.0],
        }
    }
}

/// GPU state of one scene mesh, in scene order
struct MeshSlot {
    name: String,
    gpu: GpuMesh,
    uniform: UniformBuffer<MeshUniform>,
    bind_group: wgpu::BindGroup,
    /// `None` until every texture of the material is uploaded
    material: Option<wgpu::BindGroup>,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    mesh_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
    meshes: Vec<MeshSlot>,
    textures: HashMap<String, TextureResource>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Panics
    /// Panics if unable to create a wgpu surface, adapter or device
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .expect("Failed to create surface!");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .expect("Failed to request a device!");

        // Texture colour maps are sRGB, so shading happens in linear space
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: Self::present_mode(vsync),
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{} {:?} {:?}",
            config.width,
            config.height,
            format,
            config.present_mode
        );

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mesh Bind Group Layout"),
            entries: &[binding_types::entry(0, binding_types::uniform())],
        });

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[
                binding_types::entry(0, binding_types::texture_2d()),
                binding_types::entry(1, binding_types::texture_2d()),
                binding_types::entry(2, binding_types::texture_2d()),
                binding_types::entry(3, binding_types::texture_2d()),
                binding_types::entry(4, binding_types::filtering_sampler()),
            ],
        });

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("textured", include_str!("textured.wgsl"));
        let textured = PipelineConfig::new("Textured", "textured", format)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_bind_group_layouts(vec![
                global_bindings.layout().clone(),
                mesh_layout.clone(),
                material_layout.clone(),
            ]);
        if let Err(e) = pipeline_manager.create_pipeline(TEXTURED_PIPELINE, &textured) {
            log::error!("{}", e);
        }

        RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            mesh_layout,
            material_layout,
            meshes: Vec::new(),
            textures: HashMap::new(),
            clear_color: wgpu::Color::BLACK,
        }
    }

    fn present_mode(vsync: bool) -> wgpu::PresentMode {
        if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    /// Uploads the geometry of every scene mesh and adopts the environment colour
    pub fn prepare_scene(&mut self, scene: &Scene) {
        self.clear_color = scene.environment.clear_color();
        self.meshes = scene
            .meshes
            .iter()
            .map(|node| {
                let gpu = GpuMesh::new(&self.device, &node.geometry, &node.name);
                let mut uniform = UniformBuffer::<MeshUniform>::new(&self.device);
                uniform.update_content(&self.queue, MeshUniform::new(node));

                let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{} Mesh Bind Group", node.name)),
                    layout: &self.mesh_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform.binding_resource(),
                    }],
                });

                MeshSlot {
                    name: node.name.clone(),
                    gpu,
                    uniform,
                    bind_group,
                    material: None,
                }
            })
            .collect();

        for model in &scene.models {
            log::info!(
                "Model '{}' ({}) is provided externally and not drawn",
                model.name,
                model.source
            );
        }
    }

    /// Uploads textures not on the GPU yet and enables meshes whose material is complete
    ///
    /// Returns how many meshes are drawable afterwards.
    pub fn upload_textures(&mut self, scene: &Scene, textures: &TextureSet) -> usize {
        for decoded in textures.iter() {
            if !self.textures.contains_key(&decoded.url) {
                let resource = TextureResource::from_decoded(&self.device, &self.queue, decoded);
                self.textures.insert(decoded.url.clone(), resource);
            }
        }

        for (slot, node) in self.meshes.iter_mut().zip(&scene.meshes) {
            if slot.material.is_some() {
                continue;
            }
            slot.material = Self::material_bind_group(
                &self.device,
                &self.material_layout,
                &self.textures,
                node,
            );
            if slot.material.is_some() {
                log::info!("Mesh '{}' is ready to draw", slot.name);
            }
        }

        self.meshes
            .iter()
            .filter(|slot| slot.material.is_some())
            .count()
    }

    fn material_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        textures: &HashMap<String, TextureResource>,
        node: &MeshNode,
    ) -> Option<wgpu::BindGroup> {
        if !node.material.urls().all(|url| textures.contains_key(&url)) {
            return None;
        }
        let texture = |channel: ChannelKind| textures.get(&node.material.textures.url(channel));
        let color = texture(ChannelKind::Color)?;
        let displacement = texture(ChannelKind::Displacement)?;
        let normal = texture(ChannelKind::NormalGl)?;
        let roughness = texture(ChannelKind::Roughness)?;

        Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Material Bind Group", node.name)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&displacement.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&normal.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&roughness.view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&color.sampler),
                },
            ],
        }))
    }

    /// Whether the named mesh has all its textures and will be drawn
    pub fn is_mesh_ready(&self, name: &str) -> bool {
        self.meshes
            .iter()
            .any(|slot| slot.name == name && slot.material.is_some())
    }

    /// Writes camera, light and mesh transform uniforms for this frame
    pub fn update(&mut self, scene: &Scene) {
        self.global_ubo.update_content(
            &self.queue,
            GlobalUBOContent::new(&scene.camera.uniform, &scene.lights),
        );
        for (slot, node) in self.meshes.iter_mut().zip(&scene.meshes) {
            slot.uniform.update_content(&self.queue, MeshUniform::new(node));
        }
    }

    /// Renders a frame, then the optional UI overlay on top
    pub fn render_frame<F>(&mut self, ui_callback: Option<F>) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(TEXTURED_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for slot in &self.meshes {
                    let Some(material) = &slot.material else {
                        continue;
                    };
                    render_pass.set_bind_group(1, &slot.bind_group, &[]);
                    render_pass.set_bind_group(2, material, &[]);
                    render_pass.draw_mesh(&slot.gpu);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        log::debug!("Surface resized to {}x{}", width, height);
    }

    /// Reconfigures the surface after it was lost or became outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        log::debug!("Surface reconfigured");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
