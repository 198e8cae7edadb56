use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use super::api::{
    Acquired, DeviceLostHandler, ErrorKind, GpuApi, HostModel, LostReason, Pending, SurfaceSupport,
    UncapturedErrorHandler,
};
use super::error::{AcquireError, InitError, RequestError};
use super::init::{AdapterCriteria, DeviceSpec, InstanceConfig};

/// Anything that can hand out raw window and display handles for presentation.
pub trait PresentTarget: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T> PresentTarget for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync {}

/// Production backend over `wgpu`.
#[derive(Debug, Clone)]
pub struct WgpuApi {
    host: HostModel,
}

impl WgpuApi {
    pub fn new() -> Self {
        Self {
            host: HostModel::current(),
        }
    }
}

impl Default for WgpuApi {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuApi for WgpuApi {
    type SurfaceTarget = Arc<dyn PresentTarget>;

    type Instance = wgpu::Instance;
    type Adapter = wgpu::Adapter;
    type Device = wgpu::Device;
    type Queue = wgpu::Queue;
    type Surface = wgpu::Surface<'static>;
    type SurfaceTexture = wgpu::SurfaceTexture;
    type TextureView = wgpu::TextureView;
    type CommandEncoder = wgpu::CommandEncoder;
    type CommandBuffer = wgpu::CommandBuffer;

    fn host_model(&self) -> HostModel {
        self.host
    }

    fn create_instance(&self, config: &InstanceConfig) -> Result<Self::Instance, InitError> {
        let available = wgpu::Instance::enabled_backend_features();
        if !available.intersects(config.backends) {
            return Err(InitError::NoBackend(config.backends));
        }

        Ok(wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            flags: config.flags,
            backend_options: config.backend_options.clone(),
            ..Default::default()
        }))
    }

    fn create_surface(
        &self,
        instance: &Self::Instance,
        target: Self::SurfaceTarget,
    ) -> Result<Self::Surface, InitError> {
        instance
            .create_surface(target)
            .map_err(|e| InitError::Surface(e.to_string()))
    }

    fn request_adapter<'a>(
        &'a self,
        instance: &'a Self::Instance,
        criteria: &AdapterCriteria,
        compatible_surface: &'a Self::Surface,
    ) -> Pending<'a, Result<Self::Adapter, RequestError>> {
        let power_preference = criteria.power_preference;
        let force_fallback_adapter = criteria.force_fallback_adapter;

        Box::pin(async move {
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference,
                    compatible_surface: Some(compatible_surface),
                    force_fallback_adapter,
                })
                .await
                .map_err(|e| RequestError::Failed(e.to_string()))
        })
    }

    fn poll_instance(&self, instance: &Self::Instance) {
        instance.poll_all(false);
    }

    fn describe_adapter(&self, adapter: &Self::Adapter) -> String {
        let info = adapter.get_info();
        format!("{} ({:?}, {:?})", info.name, info.backend, info.device_type)
    }

    fn request_device<'a>(
        &'a self,
        adapter: &'a Self::Adapter,
        spec: &DeviceSpec,
        on_lost: DeviceLostHandler,
    ) -> Pending<'a, Result<(Self::Device, Self::Queue), RequestError>> {
        let spec = spec.clone();

        Box::pin(async move {
            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some(spec.label.as_str()),
                    required_features: spec.required_features,
                    required_limits: spec.required_limits,
                    experimental_features: wgpu::ExperimentalFeatures::disabled(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                })
                .await
                .map_err(|e| RequestError::Failed(e.to_string()))?;

            device.set_device_lost_callback(move |reason, message| {
                let reason = match reason {
                    wgpu::DeviceLostReason::Destroyed => LostReason::Destroyed,
                    _ => LostReason::Unknown,
                };
                on_lost(reason, message);
            });

            Ok((device, queue))
        })
    }

    fn poll_adapter(&self, _adapter: &Self::Adapter) {
        // Native wgpu completes device requests eagerly. Nothing here can
        // drive a web host, whose completions need its event loop.
    }

    fn set_uncaptured_error_handler(&self, device: &Self::Device, handler: UncapturedErrorHandler) {
        device.on_uncaptured_error(Arc::new(move |error: wgpu::Error| {
            let kind = match &error {
                wgpu::Error::OutOfMemory { .. } => ErrorKind::OutOfMemory,
                wgpu::Error::Validation { .. } => ErrorKind::Validation,
                _ => ErrorKind::Internal,
            };
            handler(kind, error.to_string());
        }));
    }

    fn surface_support(&self, surface: &Self::Surface, adapter: &Self::Adapter) -> SurfaceSupport {
        let caps = surface.get_capabilities(adapter);
        SurfaceSupport {
            formats: caps.formats,
            present_modes: caps.present_modes,
            alpha_modes: caps.alpha_modes,
            max_dimension: adapter.limits().max_texture_dimension_2d,
        }
    }

    fn configure_surface(
        &self,
        surface: &Self::Surface,
        device: &Self::Device,
        config: &wgpu::SurfaceConfiguration,
    ) {
        surface.configure(device, config);
    }

    fn unconfigure_surface(&self, _surface: &Self::Surface) {
        // wgpu has no explicit unconfigure; the swapchain goes with the surface.
        log::debug!("surface configuration released");
    }

    fn acquire_texture(
        &self,
        surface: &Self::Surface,
    ) -> Result<Acquired<Self::SurfaceTexture>, AcquireError> {
        match surface.get_current_texture() {
            Ok(texture) if texture.suboptimal => Ok(Acquired::Suboptimal(texture)),
            Ok(texture) => Ok(Acquired::Ready(texture)),
            Err(wgpu::SurfaceError::Timeout) => Err(AcquireError::Timeout),
            Err(wgpu::SurfaceError::Outdated) => Err(AcquireError::Outdated),
            Err(wgpu::SurfaceError::Lost) => Err(AcquireError::Lost),
            Err(wgpu::SurfaceError::OutOfMemory) => Err(AcquireError::OutOfMemory),
            Err(wgpu::SurfaceError::Other) => Err(AcquireError::Other),
        }
    }

    fn create_view(&self, texture: &Self::SurfaceTexture) -> Self::TextureView {
        texture.texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("firstlight surface view"),
            format: Some(texture.texture.format()),
            dimension: Some(wgpu::TextureViewDimension::D2),
            aspect: wgpu::TextureAspect::All,
            base_mip_level: 0,
            mip_level_count: Some(1),
            base_array_layer: 0,
            array_layer_count: Some(1),
            ..Default::default()
        })
    }

    fn create_encoder(&self, device: &Self::Device, label: &str) -> Self::CommandEncoder {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }

    fn record_clear_pass(
        &self,
        encoder: &mut Self::CommandEncoder,
        view: &Self::TextureView,
        color: wgpu::Color,
    ) {
        // Opened and immediately ended when the pass drops.
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("firstlight clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn finish(&self, encoder: Self::CommandEncoder) -> Self::CommandBuffer {
        encoder.finish()
    }

    fn submit(&self, queue: &Self::Queue, commands: Self::CommandBuffer) {
        queue.submit(std::iter::once(commands));
    }

    fn present(&self, texture: Self::SurfaceTexture) {
        texture.present();
    }

    fn poll_device(&self, device: &Self::Device) {
        if let Err(e) = device.poll(wgpu::PollType::Poll) {
            log::warn!("device poll failed: {e}");
        }
    }
}
