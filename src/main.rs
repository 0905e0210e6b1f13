// Square Rotation: a colored square spinning as it falls down an OpenGL window

// Module declarations
mod clock;
mod config;
mod context;
mod error;
mod logging;
mod math;
mod mesh;
mod renderer;
mod scene;
mod shader;

use std::process::ExitCode;

use winit::event_loop::EventLoop;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run(DemoConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DemoConfig) -> Result<(), DemoError> {
    log::debug!("Starting with {config:?}");

    let event_loop = EventLoop::new()?;
    let renderer = renderer::Renderer::new(&event_loop, &config)?;
    renderer.run(event_loop)
}
