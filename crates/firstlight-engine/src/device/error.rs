use thiserror::Error;

/// Failure reported by an adapter or device request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The backend completed the request with a non-success status.
    #[error("backend reported failure: {0}")]
    Failed(String),

    /// The completion was dropped without ever being resolved.
    #[error("request was abandoned before completion")]
    Abandoned,
}

/// Reasons a surface configuration is rejected before reaching the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ConfigureError {
    #[error("surface size {width}x{height} is empty")]
    ZeroSize { width: u32, height: u32 },

    #[error("surface size {width}x{height} exceeds the device maximum of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("surface reports no supported formats")]
    NoSupportedFormat,

    #[error("present mode {0:?} is not supported by the surface")]
    PresentModeUnsupported(wgpu::PresentMode),
}

/// Non-success status of a surface image acquisition.
///
/// None of these are fatal; the frame is abandoned and the next tick retries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("timed out waiting for a surface image")]
    Timeout,
    #[error("surface is outdated")]
    Outdated,
    #[error("surface was lost")]
    Lost,
    #[error("out of memory while acquiring a surface image")]
    OutOfMemory,
    #[error("surface acquisition failed")]
    Other,
}

impl AcquireError {
    /// Whether the surface must be configured again before it can produce images.
    pub fn needs_reconfigure(self) -> bool {
        matches!(self, AcquireError::Outdated | AcquireError::Lost)
    }
}

/// Fatal startup failure. The frame loop must not run after one of these.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("the graphics context is already initialized")]
    AlreadyInitialized,

    #[error("none of the requested backends ({0:?}) is available")]
    NoBackend(wgpu::Backends),

    #[error("failed to create surface: {0}")]
    Surface(String),

    #[error("failed to obtain a GPU adapter")]
    Adapter(#[source] RequestError),

    #[error("failed to obtain a GPU device")]
    Device(#[source] RequestError),

    #[error("failed to configure the surface")]
    Configure(#[source] ConfigureError),
}
