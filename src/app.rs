//! Window, event loop and render loop.
//!
//! [`WaveApp`] is the builder the binary drives. Once running, every redraw
//! applies queued camera input, ticks the [`FrameDriver`], uploads the point
//! cloud if it was rebuilt and draws the field (plus the control panel when
//! the `egui` feature is enabled).

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::driver::FrameDriver;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::input::PointerInput;
use crate::params::WaveParams;
use crate::shader::WaveUniforms;

#[cfg(feature = "egui")]
use crate::gpu::EguiLayer;
#[cfg(feature = "egui")]
use crate::ui::{ControlsPanel, PanelStats};

#[cfg(feature = "egui")]
type Controls = ControlsPanel;
#[cfg(not(feature = "egui"))]
type Controls = crate::controls::TextControls;

fn make_controls(params: &WaveParams) -> Controls {
    #[cfg(feature = "egui")]
    {
        ControlsPanel::new(params)
    }
    #[cfg(not(feature = "egui"))]
    {
        crate::controls::TextControls::from_params(params)
    }
}

/// Builder for the interactive wave field window.
///
/// # Example
///
/// ```ignore
/// WaveApp::new(WaveParams::new(100, 100, 5.0))
///     .with_title("waves")
///     .run()?;
/// ```
pub struct WaveApp {
    params: WaveParams,
    title: String,
    window_size: (u32, u32),
}

impl WaveApp {
    pub fn new(params: WaveParams) -> Self {
        Self {
            params,
            title: "wavefield".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), AppError> {
        tracing::info!(
            width = self.params.width,
            height = self.params.height,
            spread = self.params.spread,
            particles = self.params.particle_count(),
            "starting wave field"
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    title: String,
    window_size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    #[cfg(feature = "egui")]
    egui: Option<EguiLayer>,
    driver: FrameDriver,
    camera: OrbitCamera,
    input: PointerInput,
    controls: Controls,
    /// First fatal error; returned from [`WaveApp::run`].
    error: Option<AppError>,
}

impl App {
    fn new(config: WaveApp) -> Self {
        let driver = FrameDriver::new(config.params);
        let camera = OrbitCamera::looking_at(OrbitCamera::DEFAULT_EYE, driver.field().center());

        Self {
            title: config.title,
            window_size: config.window_size,
            window: None,
            gpu: None,
            #[cfg(feature = "egui")]
            egui: None,
            driver,
            camera,
            input: PointerInput::new(config.window_size.0, config.window_size.1),
            controls: make_controls(&config.params),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_size.0,
                self.window_size.1,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.camera.set_aspect(size.width, size.height);
        self.input.set_window_size(size.width, size.height);

        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiLayer::new(gpu.device(), gpu.format(), &window));
        }

        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    /// Apply camera input gathered since the last frame.
    fn apply_input(&mut self) {
        let drag = self.input.drag_delta();
        if drag != glam::Vec2::ZERO {
            self.camera.orbit(drag.x, drag.y);
        }
        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.camera.zoom(scroll);
        }
        if self.input.moved() || drag != glam::Vec2::ZERO || scroll != 0.0 {
            self.driver
                .set_pointer(self.camera.pointer_on_ground(self.input.ndc()));
        }
        self.input.begin_frame();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_input();

        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return;
        };

        let update = self.driver.tick(&self.controls);
        gpu.sync_points(self.driver.scene());

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                gpu.reconfigure();
                window.request_redraw();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to acquire frame");
                window.request_redraw();
                return;
            }
        };

        let uniforms = WaveUniforms::new(self.camera.view_proj(), &update.inputs, gpu.viewport());
        gpu.draw_points(&mut frame, &uniforms);

        #[cfg(feature = "egui")]
        if let Some(egui) = &mut self.egui {
            let stats = PanelStats {
                fps: self.driver.clock().fps(),
                frame: self.driver.clock().frame(),
                particles: self.driver.field().points().len(),
                pointer: self.driver.pointer(),
            };
            let controls = &mut self.controls;
            let output = egui.run(window, |ctx| {
                controls.show(ctx, &stats);
            });
            let size = [gpu.config.width, gpu.config.height];
            egui.paint(gpu.device(), gpu.queue(), &mut frame, size, output);
        }

        gpu.finish(frame);
        window.request_redraw();
    }

    /// Offer the event to the control panel first.
    #[cfg(feature = "egui")]
    fn ui_consumed(&mut self, event: &WindowEvent) -> bool {
        match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => {
                let consumed = egui.on_window_event(window, event);
                // Keep the repulsion pointer live while hovering the panel.
                let pointer_event = matches!(event, WindowEvent::CursorMoved { .. });
                (consumed || egui.wants_pointer()) && !pointer_event
            }
            _ => false,
        }
    }

    #[cfg(not(feature = "egui"))]
    fn ui_consumed(&mut self, _event: &WindowEvent) -> bool {
        false
    }

    #[cfg(feature = "egui")]
    fn toggle_panel(&mut self) {
        self.controls.toggle();
    }

    #[cfg(not(feature = "egui"))]
    fn toggle_panel(&mut self) {}
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            tracing::error!(error = %err, "failed to initialize");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let consumed = self.ui_consumed(&event);

        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.camera.set_aspect(size.width, size.height);
                self.input.set_window_size(size.width, size.height);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(*size);
                }
            }
            WindowEvent::KeyboardInput { event: key, .. }
                if !consumed
                    && key.state == ElementState::Pressed
                    && key.logical_key == Key::Named(NamedKey::Tab) =>
            {
                self.toggle_panel();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        // Releases always reach the input so a drag ending over the panel stops.
        let release = matches!(
            event,
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            }
        );
        if !consumed || release {
            self.input.handle_event(&event);
        }
    }
}
