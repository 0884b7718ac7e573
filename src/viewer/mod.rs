//! Minimal window that animates a [`Network`].
//!
//! Drag with the left mouse button to orbit, scroll to zoom. Every redraw
//! advances the network by exactly one frame.

mod camera;
mod renderer;

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub use camera::Camera;
pub use renderer::Renderer;

use crate::error::ViewerError;
use crate::network::Network;

/// Window and presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Point sprite half-size in clip space units.
    pub point_size: f32,
    /// Clear color.
    pub background: Vec3,
    /// Initial orbit distance.
    pub camera_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "neuroweb".to_string(),
            width: 1280,
            height: 720,
            point_size: 0.004,
            background: Vec3::ZERO,
            camera_distance: 17.5,
        }
    }
}

/// Open a window and animate `network` until it is closed.
pub fn run(network: Network, config: ViewerConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(network, config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    network: Network,
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<ViewerError>,
}

impl App {
    fn new(network: Network, config: ViewerConfig) -> Self {
        let camera = Camera::new(config.camera_distance);
        Self {
            network,
            config,
            window: None,
            renderer: None,
            camera,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let renderer = pollster::block_on(Renderer::new(
            window,
            self.network.store().len(),
            self.network.graph().lines().capacity(),
            &self.config,
        ))?;
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("{}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("closing after {} frames", self.network.frame_count());
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        self.camera
                            .orbit((position.x - last_x) as f32, (position.y - last_y) as f32);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.zoom(scroll * 0.5);
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    let frame = self.network.advance();
                    match renderer.render(&frame, &self.camera) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => renderer.resize(winit::dpi::PhysicalSize {
                            width: renderer.config.width,
                            height: renderer.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
