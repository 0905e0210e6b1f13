// Renderer module: owns the GL resources and drives the frame loop

use glow::HasContext;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
};

use crate::clock::FrameClock;
use crate::config::DemoConfig;
use crate::context::RenderContext;
use crate::error::DemoError;
use crate::mesh::{self, QuadMesh};
use crate::scene::{Scene, Viewport};
use crate::shader::{self, ShaderProgram};

pub struct Renderer {
    program: ShaderProgram,
    mesh: QuadMesh,
    scene: Scene,
    clock: FrameClock,
    failure: Option<DemoError>,
    // Dropped after the GPU objects above have been released.
    context: RenderContext,
}

impl Renderer {
    pub fn new(event_loop: &EventLoop<()>, config: &DemoConfig) -> Result<Self, DemoError> {
        let context = RenderContext::new(event_loop, config)?;
        let gl = context.gl();

        let program = unsafe {
            ShaderProgram::build(gl, shader::QUAD_VERTEX_SHADER, shader::QUAD_FRAGMENT_SHADER)?
        };
        let mesh = match unsafe { QuadMesh::upload(gl) } {
            Ok(mesh) => mesh,
            Err(e) => {
                unsafe { program.destroy(gl) };
                return Err(e);
            }
        };

        if cfg!(debug_assertions) {
            let (vertices, indices) = unsafe { mesh.read_back(gl) };
            if mesh::matches_quad(&vertices, &indices) {
                log::debug!("Quad buffers verified after upload");
            } else {
                log::warn!("Quad buffers differ after upload: {vertices:?} {indices:?}");
            }
        }

        let viewport = context.viewport();
        log::info!(
            "Window '{}' ready at {}x{}",
            config.title,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            program,
            mesh,
            scene: Scene::new(viewport, config.fall_speed),
            clock: FrameClock::new(),
            failure: None,
            context,
        })
    }

    /// Runs until the window is closed or presenting fails.
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), DemoError> {
        let window_id = self.context.window().id();

        event_loop.run(|event, target| {
            target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent {
                    window_id: id,
                    event: WindowEvent::CloseRequested,
                } if id == window_id => {
                    log::info!("Quit requested");
                    self.scene.request_quit();
                    target.exit();
                }
                Event::WindowEvent {
                    window_id: id,
                    event: WindowEvent::Resized(physical_size),
                } if id == window_id => {
                    self.resize(Viewport::new(physical_size.width, physical_size.height));
                }
                Event::AboutToWait => {
                    if self.scene.is_running() {
                        self.context.window().request_redraw();
                    }
                }
                Event::WindowEvent {
                    window_id: id,
                    event: WindowEvent::RedrawRequested,
                } if id == window_id => {
                    if let Err(e) = self.update_and_render() {
                        self.scene.request_quit();
                        self.failure = Some(e);
                        target.exit();
                    }
                }
                _ => {}
            }
        })?;

        log::debug!(
            "Loop exited with the square at y={:.1}",
            self.scene.square().position
        );

        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        log::debug!("Resized to {}x{}", viewport.width, viewport.height);
        self.scene.resize(viewport.width, viewport.height);
        if viewport.is_empty() {
            return;
        }
        self.context.resize(viewport);
        self.apply_viewport();
    }

    fn apply_viewport(&self) {
        let viewport = self.scene.viewport();
        unsafe {
            self.context
                .gl()
                .viewport(0, 0, viewport.width as i32, viewport.height as i32);
        }
    }

    fn update_and_render(&mut self) -> Result<(), DemoError> {
        let time = self.clock.tick();
        let Some(transform) = self.scene.frame(&time) else {
            return Ok(());
        };

        self.apply_viewport();

        let gl = self.context.gl();
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            self.program.bind(gl);
            self.program.set_transform(gl, &transform);
            self.mesh.draw(gl);
        }

        self.context.swap()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let gl = self.context.gl();
        unsafe {
            gl.use_program(None);
            gl.bind_vertex_array(None);
            self.mesh.destroy(gl);
            self.program.destroy(gl);
        }
        log::debug!("GPU resources released");
    }
}
