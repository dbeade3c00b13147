use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

use crate::config::WindowConfig;
use crate::error::{InitError, RenderError};
use crate::render::FrameSurface;

use super::window::GlWindow;

/// Pumps allowed while waiting for the platform to deliver `resumed`.
const RESUME_PUMP_LIMIT: usize = 100;
const RESUME_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Owns the windowing subsystem and the single GL window.
///
/// Events are pumped synchronously from the render loop instead of handing
/// control to `EventLoop::run_app`, so the loop keeps the clear/draw/swap/poll
/// order. Dropping the host tears the subsystem down.
pub struct Host {
    handler: HostHandler,
    event_loop: EventLoop<()>,
}

struct HostHandler {
    config: WindowConfig,
    window: Option<GlWindow>,
    init_error: Option<InitError>,
    close_requested: bool,
}

impl Host {
    /// Initializes the windowing subsystem, opens the window with a current
    /// GL context and resolves the function table.
    pub fn create(config: &WindowConfig) -> Result<(Self, glow::Context), InitError> {
        check_size(config)?;

        let event_loop = EventLoop::new().map_err(|e| InitError::Subsystem(e.to_string()))?;
        log::info!("initialized windowing subsystem");

        let mut host = Self {
            handler: HostHandler {
                config: config.clone(),
                window: None,
                init_error: None,
                close_requested: false,
            },
            event_loop,
        };

        host.wait_for_window()?;
        let gl = host.window()?.load_functions()?;
        Ok((host, gl))
    }

    /// Window creation happens inside `resumed`; pump until it ran.
    fn wait_for_window(&mut self) -> Result<(), InitError> {
        for _ in 0..RESUME_PUMP_LIMIT {
            let status = self
                .event_loop
                .pump_app_events(Some(RESUME_PUMP_TIMEOUT), &mut self.handler);

            if let Some(err) = self.handler.init_error.take() {
                return Err(err);
            }
            if self.handler.window.is_some() {
                return Ok(());
            }
            if let PumpStatus::Exit(code) = status {
                return Err(InitError::WindowCreation(format!(
                    "event loop exited with code {code} before the window was created"
                )));
            }
        }

        Err(InitError::WindowCreation(
            "platform never resumed the application".to_string(),
        ))
    }

    fn window(&self) -> Result<&GlWindow, InitError> {
        self.handler
            .window
            .as_ref()
            .ok_or_else(|| InitError::WindowCreation("window is gone".to_string()))
    }
}

/// Surfaces cannot be built for a zero-sized window.
fn check_size(config: &WindowConfig) -> Result<(), InitError> {
    if config.width == 0 || config.height == 0 {
        return Err(InitError::WindowCreation(format!(
            "window size must be positive, got {}x{}",
            config.width, config.height
        )));
    }
    Ok(())
}

impl FrameSurface for Host {
    fn close_requested(&self) -> bool {
        self.handler.close_requested
    }

    fn swap_buffers(&mut self) -> Result<(), RenderError> {
        let window = self
            .handler
            .window
            .as_ref()
            .ok_or_else(|| RenderError::Present("window is gone".to_string()))?;
        window
            .swap_buffers()
            .map_err(|e| RenderError::Present(e.to_string()))
    }

    fn poll_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            self.handler.close_requested = true;
        }
    }
}

impl ApplicationHandler for HostHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        match GlWindow::create(event_loop, &self.config) {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::debug!("close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(window) = &self.window {
                    window.resize(size);
                }
            }
            _ => {}
        }
    }
}
