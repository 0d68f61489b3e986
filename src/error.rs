use thiserror::Error;

/// Unrecoverable startup failures. Each maps to a fixed process status.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to initialize the windowing subsystem: {0}")]
    EventLoop(#[source] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[source] winit::error::OsError),
    #[error("failed to initialize the GPU: {0:#}")]
    Gpu(anyhow::Error),
}

impl InitError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EventLoop(_) => 1,
            Self::Window(_) | Self::Gpu(_) => -1,
        }
    }
}
