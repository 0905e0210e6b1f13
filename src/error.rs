// Error types for the square rotation demo

use std::fmt;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Platform init failed, reason='{0}'")]
    Platform(#[from] winit::error::EventLoopError),

    #[error("Could not create window or pick a GL config, reason='{0}'")]
    Display(Box<dyn std::error::Error>),

    #[error("OpenGL context setup failed, reason='{0}'")]
    Context(#[from] glutin::error::Error),

    #[error("OpenGL loader could not resolve '{0}'")]
    Loader(&'static str),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("Could not create GPU resource, reason='{0}'")]
    Resource(String),

    #[error("Could not present frame, reason='{0}'")]
    Present(glutin::error::Error),
}
