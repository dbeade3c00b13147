use std::ffi::CStr;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::config::{GlProfile, WindowConfig};
use crate::error::InitError;

/// Entry point probed to decide whether the function table resolved.
const PROBE_SYMBOL: &CStr = c"glClear";

/// OS window with a GL surface and a context current on the creating thread.
///
/// Field order is drop order: the context goes first, the window last.
pub struct GlWindow {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    /// Creates the window, picks a GL config, creates a context of the
    /// requested version/profile and makes it current.
    ///
    /// Every object created before a failing step is dropped on return.
    pub(crate) fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, InitError> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| InitError::WindowCreation(format!("no usable GL config: {e}")))?;

        let window = window.ok_or_else(|| {
            InitError::WindowCreation("display builder returned no window".to_string())
        })?;

        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());
        let display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.gl_version.major,
                config.gl_version.minor,
            ))))
            .with_profile(match config.profile {
                GlProfile::Core => glutin::context::GlProfile::Core,
                GlProfile::Compatibility => glutin::context::GlProfile::Compatibility,
            })
            .build(raw_handle);

        // SAFETY: `raw_handle` belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| {
                InitError::WindowCreation(format!(
                    "OpenGL {} {} context unavailable: {e}",
                    config.gl_version, config.profile
                ))
            })?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| InitError::WindowCreation(format!("window handle unavailable: {e}")))?;

        // SAFETY: the surface is stored next to `window` and dropped before it.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| InitError::WindowCreation(format!("failed to create GL surface: {e}")))?;

        let context = not_current.make_current(&surface).map_err(|e| {
            InitError::WindowCreation(format!("failed to make context current: {e}"))
        })?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        log::info!(
            "created {}x{} window \"{}\" with OpenGL {} {} context",
            config.width,
            config.height,
            config.title,
            config.gl_version,
            config.profile
        );

        Ok(Self {
            context,
            surface,
            window,
        })
    }

    /// Resolves the GL function table through the display's loader.
    pub(crate) fn load_functions(&self) -> Result<glow::Context, InitError> {
        let display = self.context.display();

        if display.get_proc_address(PROBE_SYMBOL).is_null() {
            return Err(InitError::FunctionTable(format!(
                "{} did not resolve",
                PROBE_SYMBOL.to_string_lossy()
            )));
        }

        // SAFETY: the context is current on this thread and the loader comes
        // from the display that created it.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };
        log::debug!("resolved OpenGL function pointers");
        Ok(gl)
    }

    pub(crate) fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.window.pre_present_notify();
        self.surface.swap_buffers(&self.context)
    }

    /// Resizes the GL surface; zero-sized (minimized) windows are ignored.
    pub(crate) fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, w, h);
        }
    }
}

/// Prefers the config with the fewest samples; nothing here asks for MSAA.
///
/// `DisplayBuilder` insists on getting a config back, so an empty list cannot
/// be reported as an error from here. The template is the unconstrained
/// default, which only comes back empty when the display offers no GL config
/// at all; glutin's own picker panics in the same situation.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .min_by_key(|c| c.num_samples())
        .expect("glutin offers at least one config matching the template")
}
