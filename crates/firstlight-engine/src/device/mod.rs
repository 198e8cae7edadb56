//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the instance and bridging adapter/device requests into blocking calls
//! - configuring the surface (swapchain) and reconfiguring it on resize
//! - driving the per-frame acquire / encode / submit / present cycle

mod api;
mod bridge;
mod error;
mod frame;
mod health;
mod init;
mod instance;
mod request;
mod surface;
mod wgpu_api;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    Acquired, DeviceLostHandler, ErrorKind, GpuApi, HostModel, LostReason, Pending, SurfaceSupport,
    UncapturedErrorHandler,
};
pub use bridge::wait_driven;
pub use error::{AcquireError, ConfigureError, InitError, RequestError};
pub use frame::{FrameController, FrameOutcome, FrameState, FrameTarget};
pub use health::DeviceHealth;
pub use init::{
    AdapterCriteria, DEFAULT_CLEAR_COLOR, DEFAULT_SURFACE_SIZE, DeviceSpec, InstanceConfig,
    SurfaceSettings,
};
pub use instance::create_instance;
pub use request::{request_adapter, request_device};
pub use surface::SurfaceBinder;
pub use wgpu_api::{PresentTarget, WgpuApi};
