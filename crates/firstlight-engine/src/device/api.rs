use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::error::{AcquireError, InitError, RequestError};
use super::init::{AdapterCriteria, DeviceSpec, InstanceConfig};

/// A backend request whose completion is delivered through the backend's
/// own event dispatch.
pub type Pending<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Standing handler invoked whenever the device stops being usable.
pub type DeviceLostHandler = Box<dyn Fn(LostReason, String) + Send + 'static>;

/// Standing handler invoked for API misuse not reported through a return value.
pub type UncapturedErrorHandler = Arc<dyn Fn(ErrorKind, String) + Send + Sync + 'static>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LostReason {
    Unknown,
    Destroyed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    OutOfMemory,
    Internal,
}

/// Who drives presentation and event dispatch each frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostModel {
    /// The application presents and polls explicitly.
    Native,
    /// The hosting environment (e.g. a browser) presents and dispatches
    /// as part of its own frame lifecycle.
    ///
    /// Frames run under this model, but bring-up does not: adapter and
    /// device requests block in [`wait_driven`](super::wait_driven), and a
    /// host that only completes them from its own event loop never gets
    /// control back.
    Cooperative,
}

impl HostModel {
    /// Host model of the current compilation target.
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            HostModel::Cooperative
        } else {
            HostModel::Native
        }
    }

    pub fn presents_explicitly(self) -> bool {
        self == HostModel::Native
    }

    pub fn dispatches_explicitly(self) -> bool {
        self == HostModel::Native
    }
}

/// What a surface/adapter pair supports, captured once before the adapter is released.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSupport {
    /// Supported formats, most preferred first.
    pub formats: Vec<wgpu::TextureFormat>,
    pub present_modes: Vec<wgpu::PresentMode>,
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    /// Largest width/height the device accepts for a 2D texture.
    pub max_dimension: u32,
}

/// Successful acquisition of a presentable image.
#[derive(Debug)]
pub enum Acquired<T> {
    Ready(T),
    /// Usable, but the surface should be reconfigured before the next frame.
    Suboptimal(T),
}

impl<T> Acquired<T> {
    pub fn is_suboptimal(&self) -> bool {
        matches!(self, Acquired::Suboptimal(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Acquired::Ready(t) | Acquired::Suboptimal(t) => t,
        }
    }
}

/// The GPU runtime as seen by the lifecycle.
///
/// Every handle is released by dropping it; operations that end a handle's
/// life take it by value.
pub trait GpuApi {
    /// Raw presentable target supplied by the windowing collaborator.
    type SurfaceTarget;

    type Instance;
    type Adapter;
    type Device;
    type Queue;
    type Surface;
    type SurfaceTexture;
    type TextureView;
    type CommandEncoder;
    type CommandBuffer;

    fn host_model(&self) -> HostModel;

    fn create_instance(&self, config: &InstanceConfig) -> Result<Self::Instance, InitError>;

    fn create_surface(
        &self,
        instance: &Self::Instance,
        target: Self::SurfaceTarget,
    ) -> Result<Self::Surface, InitError>;

    fn request_adapter<'a>(
        &'a self,
        instance: &'a Self::Instance,
        criteria: &AdapterCriteria,
        compatible_surface: &'a Self::Surface,
    ) -> Pending<'a, Result<Self::Adapter, RequestError>>;

    /// Dispatch step that delivers adapter completions.
    fn poll_instance(&self, instance: &Self::Instance);

    fn describe_adapter(&self, adapter: &Self::Adapter) -> String;

    /// Requests the logical device; `on_lost` is registered as part of creation.
    fn request_device<'a>(
        &'a self,
        adapter: &'a Self::Adapter,
        spec: &DeviceSpec,
        on_lost: DeviceLostHandler,
    ) -> Pending<'a, Result<(Self::Device, Self::Queue), RequestError>>;

    /// Dispatch step that delivers device completions.
    fn poll_adapter(&self, adapter: &Self::Adapter);

    fn set_uncaptured_error_handler(&self, device: &Self::Device, handler: UncapturedErrorHandler);

    fn surface_support(&self, surface: &Self::Surface, adapter: &Self::Adapter) -> SurfaceSupport;

    fn configure_surface(
        &self,
        surface: &Self::Surface,
        device: &Self::Device,
        config: &wgpu::SurfaceConfiguration,
    );

    fn unconfigure_surface(&self, surface: &Self::Surface);

    fn acquire_texture(
        &self,
        surface: &Self::Surface,
    ) -> Result<Acquired<Self::SurfaceTexture>, AcquireError>;

    /// 2D view, one mip level, one array layer, in the texture's own format.
    fn create_view(&self, texture: &Self::SurfaceTexture) -> Self::TextureView;

    fn create_encoder(&self, device: &Self::Device, label: &str) -> Self::CommandEncoder;

    /// Records one render pass that clears `view` to `color` and stores it.
    fn record_clear_pass(
        &self,
        encoder: &mut Self::CommandEncoder,
        view: &Self::TextureView,
        color: wgpu::Color,
    );

    fn finish(&self, encoder: Self::CommandEncoder) -> Self::CommandBuffer;

    fn submit(&self, queue: &Self::Queue, commands: Self::CommandBuffer);

    fn present(&self, texture: Self::SurfaceTexture);

    /// Non-blocking dispatch step for steady-state callbacks.
    fn poll_device(&self, device: &Self::Device);
}
