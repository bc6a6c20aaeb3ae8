use anyhow::Context;
use futures::channel::oneshot;
use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    animation::{AnimationScheduler, EntranceSlot},
    assets::{
        AssetLoadError, AssetLoader, FileTextureSource, ProgressIndicator, TextureSet,
    },
    config::ShowcaseConfig,
    gfx::{
        camera::{PointerCameraRig, PointerTracker},
        rendering::RenderEngine,
        scene::Scene,
        ui::UiManager,
    },
};

type BundleResult = Result<TextureSet, AssetLoadError>;
type UiPass<'a> =
    dyn FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView) + 'a;

/// The showcase window: owns the event loop and all per-frame state
pub struct ShowcaseApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ShowcaseConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    pointer: PointerTracker,
    rig: PointerCameraRig,
    scheduler: AnimationScheduler,
    entrance: EntranceSlot,
    entrance_started: bool,
    loader: AssetLoader,
    indicator: ProgressIndicator,
    pending_bundle: Option<oneshot::Receiver<BundleResult>>,
    loaded_textures: Option<TextureSet>,
    last_frame: Instant,
}

impl ShowcaseApp {
    pub fn new(config: ShowcaseConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;

        let aspect = config.window_width as f32 / config.window_height.max(1) as f32;
        let scene = Scene::showcase(
            &config.texture_resolution,
            &config.texture_extension,
            aspect,
        );

        let source = FileTextureSource::new(&config.asset_root)
            .with_chunk_bytes(config.fetch_chunk_bytes);
        let loader = AssetLoader::new(source);
        let indicator = ProgressIndicator::new(loader.progress());

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                pointer: PointerTracker::new(config.window_width, config.window_height),
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                rig: PointerCameraRig::new(),
                scheduler: AnimationScheduler::new(),
                entrance: EntranceSlot::new(),
                entrance_started: false,
                loader,
                indicator,
                pending_bundle: None,
                loaded_textures: None,
                last_frame: Instant::now(),
            },
        })
    }

    /// Starts loading textures and runs the event loop until the window closes
    pub fn run(mut self) -> anyhow::Result<()> {
        self.app_state.start_loading()?;

        let event_loop = self
            .event_loop
            .take()
            .context("Event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self.app_state)
            .context("Event loop terminated with an error")?;
        Ok(())
    }
}

impl AppState {
    /// Resolves the scene's texture bundle on a worker thread
    fn start_loading(&mut self) -> anyhow::Result<()> {
        let bundle = self
            .scene
            .texture_bundle()
            .context("Invalid texture bundle")?;
        let loader = self.loader.clone();
        let (sender, receiver) = oneshot::channel();

        std::thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || {
                let result = pollster::block_on(loader.request(bundle));
                // The window may already be gone
                let _ = sender.send(result);
            })
            .context("Failed to spawn texture loader")?;

        self.pending_bundle = Some(receiver);
        Ok(())
    }

    fn poll_bundle(&mut self) {
        let Some(receiver) = self.pending_bundle.as_mut() else {
            return;
        };
        match receiver.try_recv() {
            Ok(None) => {}
            Ok(Some(Ok(textures))) => {
                self.pending_bundle = None;
                self.loaded_textures = Some(textures);
            }
            Ok(Some(Err(e))) => {
                self.pending_bundle = None;
                log::error!("Textures unavailable, meshes stay hidden: {}", e);
            }
            Err(_) => {
                self.pending_bundle = None;
                log::error!("Texture loader stopped without a result");
            }
        }
    }

    /// Starts the entrance once the ball is drawable
    fn mount_entrance(&mut self) {
        if !self.config.entrance_animation || self.entrance_started {
            return;
        }
        let ready = self
            .render_engine
            .as_ref()
            .is_some_and(|engine| engine.is_mesh_ready(Scene::BALL));
        if !ready {
            return;
        }
        let Some(target) = self.scene.focal_target() else {
            return;
        };

        self.entrance_started = true;
        if let Err(e) = self.entrance.mount(&mut self.scheduler, &target) {
            log::warn!("Entrance animation skipped: {}", e);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.entrance.unmount();
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.rig
            .tick(self.pointer.sample(), Some(&mut self.scene.camera));
        self.scheduler.tick(delta_time);
        self.poll_bundle();

        if let (Some(render_engine), Some(textures)) =
            (self.render_engine.as_mut(), self.loaded_textures.take())
        {
            let ready = render_engine.upload_textures(&self.scene, &textures);
            log::debug!("{} of {} meshes drawable", ready, self.scene.meshes.len());
        }
        self.mount_entrance();

        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return;
        };

        self.scene.update();
        render_engine.update(&self.scene);

        let indicator = &self.indicator;
        let result = match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                let ui_pass: Box<UiPass<'_>> =
                    Box::new(|device: &wgpu::Device,
                              queue: &wgpu::Queue,
                              encoder: &mut wgpu::CommandEncoder,
                              color_attachment: &wgpu::TextureView| {
                        ui_manager.draw(device, queue, encoder, window, color_attachment, |ui| {
                            indicator.draw(ui)
                        });
                    });
                render_engine.render_frame(Some(ui_pass))
            }
            None => render_engine.render_frame(None::<Box<UiPass<'_>>>),
        };

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                self.shutdown(event_loop);
            }
            Err(e) => log::warn!("Dropped frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title("Vitrine")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.inner_size().into();
        let vsync = self.config.vsync;
        let window_clone = window.clone();
        let mut render_engine = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, vsync).await
        });
        render_engine.prepare_scene(&self.scene);

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.pointer.resize(width, height);
        self.scene.camera.resize_projection(width, height);

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(render_engine);
        self.window = Some(window);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.pointer.process_event(&event);

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        state: winit::event::ElementState::Pressed,
                        physical_key:
                            winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape),
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.entrance.unmount();
        log::info!("Showcase closed");
    }
}
