use anyhow::Result;
use clap::Parser;
use plaza_assets::{FontFace, TextureId, TextureStore, load_phrases};
use plaza_common::Color;
use plaza_render::OrbitCamera;
use plaza_render_wgpu::WgpuRenderer;
use plaza_scene::{Scene, builder};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

// Signage panel dimensions in world units.
const SIGNAGE_WIDTH: f32 = 400.0;
const SIGNAGE_HEIGHT: f32 = 400.0;
const SIGNAGE_DEPTH: f32 = 12.0;

// Untextured stand-in colors when an image fails to load.
const SKY_FALLBACK: Color = Color::from_hex(0x87a5c8);
const FLOOR_FALLBACK: Color = Color::from_hex(0x777777);
const SIGNAGE_FALLBACK: Color = Color::from_hex(0xcccccc);

#[derive(Parser)]
#[command(name = "plaza-desktop", about = "Phrase plaza desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Phrase data file ({title, votes} records)
    #[arg(long, default_value = "./assets/data/phrases.json")]
    phrases: String,

    /// Typeface JSON for extruded labels
    #[arg(long, default_value = "./assets/data/typeface.json")]
    font: String,

    /// Sky texture image
    #[arg(long, default_value = "./assets/textures/sky.jpg")]
    sky_texture: String,

    /// Floor texture image
    #[arg(long, default_value = "./assets/textures/floor.jpg")]
    floor_texture: String,

    /// Signage texture image
    #[arg(long, default_value = "./assets/textures/signage.jpg")]
    signage_texture: String,
}

/// Application state: the immutable scene, its textures, and the camera.
struct AppState {
    scene: Scene,
    textures: TextureStore,
    camera: OrbitCamera,
    mouse_pressed: bool,
}

impl AppState {
    /// Build the whole scene from the configured assets. Missing assets
    /// degrade the scene instead of aborting: textures fall back to solid
    /// colors, a bad phrase file or font skips the label ring.
    fn new(cli: &Cli) -> Self {
        let mut textures = TextureStore::new();
        let sky = load_or_fallback(&mut textures, &cli.sky_texture, "sky", SKY_FALLBACK);
        let floor = load_or_fallback(&mut textures, &cli.floor_texture, "floor", FLOOR_FALLBACK);
        let signage = load_or_fallback(
            &mut textures,
            &cli.signage_texture,
            "signage",
            SIGNAGE_FALLBACK,
        );

        let mut scene = Scene::new();
        builder::setup_environment(&mut scene);
        builder::build_sky(&mut scene, Some(sky));
        builder::build_floor(&mut scene, Some(floor));

        match (load_phrases(&cli.phrases), FontFace::load(&cli.font)) {
            (Ok(phrases), Ok(font)) => {
                match builder::build_label_ring(&mut scene, &phrases, &font) {
                    Ok(ids) => tracing::info!(groups = ids.len(), "label ring built"),
                    Err(e) => tracing::error!("invalid phrase data, skipping ring: {e}"),
                }
            }
            (Err(e), _) => tracing::error!("failed to load phrases, skipping ring: {e}"),
            (_, Err(e)) => tracing::error!("failed to load font, skipping ring: {e}"),
        }

        if let Err(e) = builder::build_signage(
            &mut scene,
            SIGNAGE_WIDTH,
            SIGNAGE_HEIGHT,
            SIGNAGE_DEPTH,
            Some(signage),
        ) {
            tracing::error!("skipping signage: {e}");
        }

        tracing::info!(
            meshes = scene.mesh_count(),
            groups = scene.group_count(),
            "scene populated"
        );

        Self {
            scene,
            textures,
            camera: OrbitCamera::default(),
            mouse_pressed: false,
        }
    }
}

fn load_or_fallback(
    textures: &mut TextureStore,
    path: &str,
    name: &str,
    fallback: Color,
) -> TextureId {
    match textures.load_file(path) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("failed to load {name} texture from {path}: {e}; using solid color");
            textures.solid(name, fallback)
        }
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Phrase Plaza")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                // Degraded mode: stay alive without a render target.
                tracing::error!("failed to create window, running without rendering: {e}");
                return;
            }
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = match instance.create_surface(window.clone()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("failed to create surface, running without rendering: {e}");
                self.window = Some(window);
                return;
            }
        };

        let Some(adapter) =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            }))
        else {
            tracing::error!("no compatible GPU adapter, running without rendering");
            self.window = Some(window);
            return;
        };

        let (device, queue) = match pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("plaza_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        )) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!("failed to create device, running without rendering: {e}");
                self.window = Some(window);
                return;
            }
        };

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.set_aspect(size.width, size.height);

        let mut renderer =
            WgpuRenderer::new(&device, &queue, surface_format, size.width, size.height);
        renderer.prepare(&device, &queue, &self.state.scene, &self.state.textures);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.camera.set_aspect(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.mouse_pressed = btn_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.state.camera.zoom(amount);
            }
            WindowEvent::RedrawRequested => {
                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.scene, &self.state.camera);
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if let winit::event::DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_pressed {
                self.state.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("plaza-desktop starting");

    let state = AppState::new(&cli);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
