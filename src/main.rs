use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use glam::DVec2;
use log::{error, info};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use spotlight_cube::platform::{self, VirtualCursor};
use spotlight_cube::{App, AppConfig, InitError, InputEvent, Renderer, TextureImage};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        let code = err
            .downcast_ref::<InitError>()
            .map_or(1, InitError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let config = AppConfig::from_env();
    let event_loop = EventLoop::new().map_err(InitError::EventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config);
    event_loop.run_app(&mut viewer)?;

    match viewer.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Viewer {
    config: AppConfig,
    app: App,
    renderer: Option<Renderer>,
    cursor: VirtualCursor,
    failure: Option<anyhow::Error>,
}

impl Viewer {
    fn new(config: AppConfig) -> Self {
        let centre = DVec2::new(config.width as f64 / 2.0, config.height as f64 / 2.0);
        Self {
            app: App::new(&config, Instant::now()),
            config,
            renderer: None,
            cursor: VirtualCursor::new(centre),
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn init_renderer(&self, event_loop: &ActiveEventLoop) -> Result<Renderer> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(InitError::Window)?,
        );

        let texture = match TextureImage::load(&self.config.texture_path) {
            Ok(texture) => {
                info!(
                    "loaded texture {} ({}x{}, {} mip levels)",
                    self.config.texture_path.display(),
                    texture.width(),
                    texture.height(),
                    texture.mip_level_count()
                );
                texture
            }
            Err(err) => {
                error!("{err}; drawing with a black placeholder");
                TextureImage::placeholder()
            }
        };

        let renderer = block_on(Renderer::new(
            Arc::clone(&window),
            &texture,
            self.config.clear_color,
        ))
        .map_err(InitError::Gpu)?;

        platform::set_cursor_capture(&window, true);
        Ok(renderer)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if renderer.is_minimized() {
            return;
        }
        let Some(params) = self.app.begin_frame(Instant::now(), renderer.aspect_ratio()) else {
            event_loop.exit();
            return;
        };
        match renderer.render(&params) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU is out of memory"));
            }
            Err(wgpu::SurfaceError::Timeout) => info!("Surface timeout; retrying next frame"),
            Err(wgpu::SurfaceError::Other) => error!("surface error; retrying next frame"),
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.init_renderer(event_loop) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                // Start timing from the first presentable frame, not from
                // process start.
                self.app = App::new(&self.config, Instant::now());
                info!("render loop running");
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if window_id != renderer.window_id() {
            return;
        }

        match &event {
            WindowEvent::Resized(size) => renderer.resize(*size),
            WindowEvent::Focused(focused) => {
                platform::set_cursor_capture(renderer.window(), *focused);
                self.app.handle_event(InputEvent::CaptureChanged(*focused));
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        if let Some(input) = platform::translate_window_event(&event) {
            self.app.handle_event(input);
        }
        if !self.app.is_running() {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.renderer.is_some() && self.app.is_captured() {
                let moved = self.cursor.apply_motion(dx, dy);
                self.app.handle_event(moved);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &self.renderer {
            renderer.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // GPU resources must go before the window they render into.
        self.renderer = None;
        info!("viewer shut down");
    }
}
