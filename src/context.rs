// Window and OpenGL context bootstrap

use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::scene::Viewport;

/// A window with a current OpenGL context and loaded function pointers.
///
/// Fields drop in declaration order: GL function table, surface, context,
/// then the window itself.
pub struct RenderContext {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl RenderContext {
    pub fn new(event_loop: &EventLoop<()>, config: &DemoConfig) -> Result<Self, DemoError> {
        let mut window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(true);
        if let Some(position) = centered_position(event_loop, config) {
            window_builder = window_builder.with_position(position);
        }

        let template = ConfigTemplateBuilder::new()
            .with_depth_size(config.depth_bits)
            .with_stencil_size(config.stencil_bits)
            .with_single_buffering(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(event_loop, template, |configs| {
                // Prefer the config with the fewest samples; no MSAA is requested.
                configs
                    .reduce(|best, candidate| {
                        if candidate.num_samples() < best.num_samples() {
                            candidate
                        } else {
                            best
                        }
                    })
                    .expect("glutin errors out before offering an empty config list")
            })
            .map_err(DemoError::Display)?;
        let window = window.ok_or_else(|| DemoError::Display("window was not created".into()))?;

        log::debug!(
            "Picked GL config: depth={} stencil={} samples={}",
            gl_config.depth_size(),
            gl_config.stencil_size(),
            gl_config.num_samples()
        );

        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.gl_major,
                config.gl_minor,
            ))))
            .with_profile(GlProfile::Core)
            .with_debug(false)
            .build(Some(window.raw_window_handle()));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };
        let surface_attributes = window.build_surface_attributes(Default::default());
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        if gl_display.get_proc_address(c"glCreateShader").is_null() {
            return Err(DemoError::Loader("glCreateShader"));
        }
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };

        match config.vsync {
            Some(vsync) => {
                let interval = if vsync {
                    SwapInterval::Wait(NonZeroU32::MIN)
                } else {
                    SwapInterval::DontWait
                };
                if let Err(e) = surface.set_swap_interval(&context, interval) {
                    log::warn!("Could not set swap interval {interval:?}: {e}");
                }
            }
            None => log::debug!("Leaving swap interval at driver default"),
        }

        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }

    /// Resizes the drawable surface. Zero sizes (minimized window) are skipped.
    pub fn resize(&self, viewport: Viewport) {
        if let (Some(width), Some(height)) = (
            NonZeroU32::new(viewport.width),
            NonZeroU32::new(viewport.height),
        ) {
            self.surface.resize(&self.context, width, height);
        }
    }

    /// Presents the back buffer.
    pub fn swap(&self) -> Result<(), DemoError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(DemoError::Present)
    }
}

/// Top-left corner that centers the window on the primary monitor.
fn centered_position(
    event_loop: &EventLoop<()>,
    config: &DemoConfig,
) -> Option<PhysicalPosition<i32>> {
    let monitor = event_loop.primary_monitor()?;
    let screen = monitor.size();
    let origin = monitor.position();
    let scale = monitor.scale_factor();

    let width = (f64::from(config.width) * scale).round() as i32;
    let height = (f64::from(config.height) * scale).round() as i32;

    Some(PhysicalPosition::new(
        origin.x + (screen.width as i32 - width) / 2,
        origin.y + (screen.height as i32 - height) / 2,
    ))
}
