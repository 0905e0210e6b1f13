// Quad geometry and its GPU buffers

use std::mem::size_of;

use bytemuck::Zeroable;
use glow::HasContext;

use crate::error::DemoError;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const POSITION_LOCATION: u32 = 0;
pub const COLOR_LOCATION: u32 = 1;
pub const VERTEX_STRIDE: i32 = size_of::<Vertex>() as i32;
pub const COLOR_OFFSET: i32 = size_of::<[f32; 3]>() as i32;

/// 100x100 square centered on the origin, one color per corner.
#[rustfmt::skip]
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-50.0,  50.0, 0.0], color: [1.0, 0.0, 0.0] }, // red
    Vertex { position: [ 50.0,  50.0, 0.0], color: [0.0, 1.0, 0.0] }, // green
    Vertex { position: [ 50.0, -50.0, 0.0], color: [0.0, 0.0, 1.0] }, // blue
    Vertex { position: [-50.0, -50.0, 0.0], color: [1.0, 1.0, 0.0] }, // yellow
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Vertex array plus the immutable vertex and index buffers it references.
pub struct QuadMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: i32,
}

impl QuadMesh {
    /// Uploads the quad once with STATIC_DRAW usage and records the attribute layout.
    ///
    /// # Safety
    /// `gl` must belong to the context current on this thread.
    pub unsafe fn upload(gl: &glow::Context) -> Result<Self, DemoError> {
        let vao = gl.create_vertex_array().map_err(DemoError::Resource)?;
        let vbo = gl.create_buffer().map_err(DemoError::Resource)?;
        let ebo = gl.create_buffer().map_err(DemoError::Resource)?;

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );

        // Element buffer binding is captured by the bound VAO.
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_INDICES),
            glow::STATIC_DRAW,
        );

        gl.vertex_attrib_pointer_f32(POSITION_LOCATION, 3, glow::FLOAT, false, VERTEX_STRIDE, 0);
        gl.enable_vertex_attrib_array(POSITION_LOCATION);
        gl.vertex_attrib_pointer_f32(
            COLOR_LOCATION,
            3,
            glow::FLOAT,
            false,
            VERTEX_STRIDE,
            COLOR_OFFSET,
        );
        gl.enable_vertex_attrib_array(COLOR_LOCATION);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        log::debug!(
            "Uploaded quad: {} vertices, {} indices, stride {VERTEX_STRIDE} bytes",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Ok(Self {
            vao,
            vbo,
            ebo,
            index_count: QUAD_INDICES.len() as i32,
        })
    }

    /// Issues one indexed triangle draw. The shader program must already be bound.
    ///
    /// # Safety
    /// `gl` must belong to the context the mesh was uploaded with.
    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
    }

    /// Reads both buffers back from the GPU.
    ///
    /// # Safety
    /// `gl` must belong to the context the mesh was uploaded with.
    pub unsafe fn read_back(&self, gl: &glow::Context) -> (Vec<Vertex>, Vec<u32>) {
        let mut vertices = vec![Vertex::zeroed(); QUAD_VERTICES.len()];
        let mut indices = vec![0u32; self.index_count as usize];

        gl.bind_vertex_array(Some(self.vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
        gl.get_buffer_sub_data(
            glow::ARRAY_BUFFER,
            0,
            bytemuck::cast_slice_mut(&mut vertices),
        );
        gl.get_buffer_sub_data(
            glow::ELEMENT_ARRAY_BUFFER,
            0,
            bytemuck::cast_slice_mut(&mut indices),
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);

        (vertices, indices)
    }

    /// # Safety
    /// `gl` must belong to the context the mesh was uploaded with. The mesh
    /// must not be drawn afterwards.
    pub unsafe fn destroy(&self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
    }
}

/// True when GPU contents match the literal quad exactly.
pub fn matches_quad(vertices: &[Vertex], indices: &[u32]) -> bool {
    vertices == QUAD_VERTICES.as_slice() && indices == QUAD_INDICES.as_slice()
}
