//! Shoreline - wind-shaped sand dunes running down into foaming water
//!
//! The water finds its shoreline every frame by comparing its own depth
//! with a depth capture of the scene rendered without it.

mod cli;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use shoreline::assets::{spawn_texture_load, PendingAsset};
use shoreline::error::RenderError;
use shoreline::frame::{FrameOrchestrator, Viewport};
use shoreline::noise::NoiseField;
use shoreline::params::SceneConfig;
use shoreline::rendering::{GpuRenderer, TextureSlot};
use shoreline::scene::Scene;

use cli::Args;

/// Pixels per wheel "line" for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f64 = 40.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    frames: FrameOrchestrator,

    // Scene
    config: SceneConfig,
    scene: Scene,
    assets_dir: std::path::PathBuf,
    pending: Vec<(TextureSlot, PendingAsset)>,

    // Input
    dragging: bool,
    last_cursor: Option<(f64, f64)>,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(config: SceneConfig, scene: Scene, assets_dir: std::path::PathBuf) -> Self {
        Self {
            window: None,
            renderer: None,
            frames: FrameOrchestrator::new(),
            config,
            scene,
            assets_dir,
            pending: Vec::new(),
            dragging: false,
            last_cursor: None,
            start_time: Instant::now(),
        }
    }

    fn start_texture_loads(&mut self, max_dimension: u32) {
        let dir: &Path = &self.assets_dir;
        self.pending = vec![
            (
                TextureSlot::Sand,
                spawn_texture_load(
                    dir.join(&self.config.terrain_material.texture_file),
                    max_dimension,
                ),
            ),
            (
                TextureSlot::Distortion,
                spawn_texture_load(dir.join(&self.config.water.distortion_file), max_dimension),
            ),
        ];
    }

    /// Hand finished textures to the renderer; failures keep the fallback
    fn poll_assets(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        self.pending.retain_mut(|(slot, pending)| match pending.poll() {
            None => true,
            Some(Ok(texture)) => {
                match renderer.set_texture(*slot, &texture) {
                    Ok(()) => info!(path = %pending.path().display(), "texture loaded"),
                    Err(e) => warn!(
                        path = %pending.path().display(),
                        "{}, keeping fallback texture",
                        e
                    ),
                }
                false
            }
            Some(Err(e)) => {
                warn!("{}, keeping fallback texture", e);
                false
            }
        });
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_assets();

        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };

        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);
        let time_s = self.start_time.elapsed().as_secs_f32();

        match self
            .frames
            .run_frame(&mut self.scene, renderer, viewport, time_s)
        {
            Ok(_) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                debug!("surface lost or outdated, reconfigured");
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let render = &self.config.render;
        let window_attributes = Window::default_attributes()
            .with_title("Shoreline")
            .with_inner_size(winit::dpi::LogicalSize::new(
                render.window_width,
                render.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(GpuRenderer::new(
            Arc::clone(&window),
            &self.scene,
            render,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        info!("Shoreline is running. Drag to orbit, scroll to zoom, ESC to quit");

        let max_dimension = renderer.max_texture_dimension();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.start_texture_loads(max_dimension);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            // Size-dependent resources are rebuilt by the next frame
            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((x, y))) = (self.dragging, self.last_cursor) {
                    self.scene
                        .camera
                        .rotate((position.x - x) as f32, (position.y - y) as f32);
                }
                self.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
                };
                self.scene.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Shoreline - procedural dunes and shoreline foam");

    let config = args.parse_preset().config();
    let phrase = args.seed_phrase(&config);
    let noise = NoiseField::from_phrase(phrase);
    info!(phrase, seed = noise.seed(), "noise field seeded");

    let scene = Scene::build(&config, &noise).context("invalid scene parameters")?;

    let mut app = App::new(config, scene, args.assets_dir);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app).context("event loop terminated")?;

    Ok(())
}
