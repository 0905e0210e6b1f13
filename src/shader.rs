// Shader compilation and the transform uniform

use glam::Mat4;
use glow::HasContext;

use crate::error::{DemoError, ShaderStage};

pub const QUAD_VERTEX_SHADER: &str = include_str!("shaders/quad.vert");
pub const QUAD_FRAGMENT_SHADER: &str = include_str!("shaders/quad.frag");

/// Name of the 4x4 matrix uniform read by the vertex shader.
pub const TRANSFORM_UNIFORM: &str = "transform";

/// Linked program with its cached `transform` location.
pub struct ShaderProgram {
    program: glow::Program,
    transform: Option<glow::UniformLocation>,
}

impl ShaderProgram {
    /// Compiles both stages, links them, and checks status at every step.
    /// Driver diagnostics are returned in the error on failure.
    ///
    /// # Safety
    /// `gl` must belong to the context current on this thread.
    pub unsafe fn build(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, DemoError> {
        let vertex = compile(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile(gl, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(DemoError::Resource(e));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !linked {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(DemoError::ProgramLink(info));
        }

        let transform = gl.get_uniform_location(program, TRANSFORM_UNIFORM);
        if transform.is_none() {
            log::warn!("Uniform '{TRANSFORM_UNIFORM}' not active in linked program");
        }

        log::debug!("Shader program linked");
        Ok(Self { program, transform })
    }

    /// # Safety
    /// `gl` must belong to the context the program was built with.
    pub unsafe fn bind(&self, gl: &glow::Context) {
        gl.use_program(Some(self.program));
    }

    /// Uploads `matrix` column-major. The program must be bound.
    ///
    /// # Safety
    /// `gl` must belong to the context the program was built with.
    pub unsafe fn set_transform(&self, gl: &glow::Context, matrix: &Mat4) {
        gl.uniform_matrix_4_f32_slice(self.transform.as_ref(), false, &matrix.to_cols_array());
    }

    /// # Safety
    /// `gl` must belong to the context the program was built with.
    pub unsafe fn destroy(&self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }
}

unsafe fn compile(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, DemoError> {
    let shader = gl.create_shader(stage.gl_kind()).map_err(DemoError::Resource)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(DemoError::ShaderCompile { stage, log });
    }

    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_target_gl_460_core() {
        for src in [QUAD_VERTEX_SHADER, QUAD_FRAGMENT_SHADER] {
            assert!(src.starts_with("#version 460 core\n"));
        }
    }

    #[test]
    fn vertex_shader_matches_attribute_layout() {
        assert!(QUAD_VERTEX_SHADER.contains("layout (location = 0) in vec3 aPos;"));
        assert!(QUAD_VERTEX_SHADER.contains("layout (location = 1) in vec3 aColor;"));
        assert!(QUAD_VERTEX_SHADER.contains(&format!("uniform mat4 {TRANSFORM_UNIFORM};")));
    }

    #[test]
    fn fragment_shader_outputs_opaque_color() {
        assert!(QUAD_FRAGMENT_SHADER.contains("in vec3 vColor;"));
        assert!(QUAD_FRAGMENT_SHADER.contains("vec4(vColor, 1.0)"));
    }
}
