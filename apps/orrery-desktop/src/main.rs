use anyhow::{Context, Result};
use clap::Parser;
use orrery_capture::{CaptureSession, Frame, RowOrder};
use orrery_input::{Action, KeyBindings};
use orrery_kernel::{Body, DEFAULT_DAY_STEP, DEFAULT_START_DAY, SceneState};
use orrery_render::{LookAtCamera, frame_transforms};
use orrery_render_wgpu::{ShaderLibrary, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

const WINDOW_WIDTH: u32 = 1024;
const WINDOW_HEIGHT: u32 = 768;

#[derive(Parser)]
#[command(name = "orrery-desktop", about = "Sun, earth, and moon orrery")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Body the camera looks at: sun, earth, or moon
    #[arg(long, default_value = "moon")]
    look_at: Body,

    /// Simulated day to start from
    #[arg(long, default_value_t = DEFAULT_START_DAY)]
    start_day: f64,

    /// Simulated days added per rendered frame
    #[arg(long, default_value_t = DEFAULT_DAY_STEP)]
    day_step: f64,

    /// File name prefix for frame captures
    #[arg(long, default_value = "cube1")]
    capture_prefix: String,

    /// Directory frame captures are written to
    #[arg(long, default_value = ".")]
    capture_dir: PathBuf,

    /// Load shader sources from this directory instead of the built-in ones
    #[arg(long)]
    shader_dir: Option<PathBuf>,
}

/// Application state owned by the frame loop.
struct AppState {
    scene: SceneState,
    camera: LookAtCamera,
    bindings: KeyBindings,
    captures: CaptureSession,
    capture_pending: bool,
}

impl AppState {
    fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            scene: SceneState::new(cli.start_day, cli.day_step)?,
            camera: LookAtCamera::looking_at(cli.look_at),
            bindings: KeyBindings::default(),
            captures: CaptureSession::new(&cli.capture_dir, cli.capture_prefix.clone()),
            capture_pending: false,
        })
    }
}

/// Everything created once a window exists.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    can_capture: bool,
}

impl Gpu {
    fn new(window: Arc<Window>, shaders: &ShaderLibrary) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orrery_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are written as-is, like a plain (non-sRGB) framebuffer.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let can_capture = surface_caps.usages.contains(wgpu::TextureUsages::COPY_SRC);
        let usage = if can_capture {
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC
        } else {
            tracing::warn!("surface does not support COPY_SRC, frame capture disabled");
            wgpu::TextureUsages::RENDER_ATTACHMENT
        };

        let config = wgpu::SurfaceConfiguration {
            usage,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            shaders,
        )
        .context("failed to build body pipeline")?;

        tracing::info!(
            "GPU initialized with {} backend, surface {:?} {}x{}",
            adapter.get_info().backend.to_str(),
            surface_format,
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            can_capture,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Read back `texture` and write it through the capture session.
    fn capture(&self, texture: &wgpu::Texture, captures: &mut CaptureSession) -> Result<PathBuf> {
        anyhow::ensure!(self.can_capture, "surface cannot be read back");
        let pixels = self
            .renderer
            .read_back(&self.device, &self.queue, texture)?;
        let frame = Frame::new(pixels.width, pixels.height, pixels.data, RowOrder::TopDown)?;
        Ok(captures.capture(&frame)?)
    }
}

struct GpuApp {
    state: AppState,
    shaders: ShaderLibrary,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    /// Set when startup fails; returned from `main` after the loop exits.
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, shaders: ShaderLibrary) -> Self {
        Self {
            state,
            shaders,
            window: None,
            gpu: None,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.gpu = Some(Gpu::new(window.clone(), &self.shaders)?);
        self.window = Some(window);
        Ok(())
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => {
                tracing::info!("quit requested");
                event_loop.exit();
            }
            Action::CaptureFrame => {
                tracing::info!("capture {} requested", self.state.captures.counter());
                self.state.capture_pending = true;
            }
            Action::Noop => {}
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };

        self.state.scene.advance();
        let frame = frame_transforms(&self.state.scene, &self.state.camera);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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
        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        if std::mem::take(&mut self.state.capture_pending) {
            if let Err(e) = gpu.capture(&output.texture, &mut self.state.captures) {
                tracing::error!("frame capture failed: {e:#}");
            }
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let action =
                    self.state
                        .bindings
                        .resolve(key, key_state == ElementState::Pressed, repeat);
                self.handle_action(event_loop, action);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
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

    tracing::info!(
        "orrery-desktop starting at day {} looking at {}",
        cli.start_day,
        cli.look_at
    );

    let state = AppState::from_cli(&cli)?;
    let shaders = match &cli.shader_dir {
        Some(dir) => ShaderLibrary::from_dir(dir),
        None => ShaderLibrary::embedded(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, shaders);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }
    tracing::info!(
        "orrery-desktop exiting after {} frames, {} captures",
        app.state.scene.frame(),
        app.state.captures.counter()
    );
    Ok(())
}
