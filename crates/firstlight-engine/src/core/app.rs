use std::sync::Arc;

use crate::device::{
    DeviceHealth, FrameController, FrameOutcome, FrameTarget, GpuApi, InitError, SurfaceBinder,
    create_instance, request_adapter, request_device,
};

use super::config::AppConfig;

/// Handles that live from initialization to termination.
///
/// Field order is irrelevant: [`Application::terminate`] releases them explicitly.
struct Gpu<A: GpuApi> {
    device: A::Device,
    queue: A::Queue,
    surface: A::Surface,
    binder: SurfaceBinder,
}

/// Owns the GPU context and drives it one frame at a time.
///
/// Lifecycle: [`initialize`](Self::initialize) once, [`main_loop`](Self::main_loop)
/// while [`is_running`](Self::is_running), then [`terminate`](Self::terminate).
pub struct Application<A: GpuApi> {
    api: A,
    config: AppConfig,
    health: Arc<DeviceHealth>,
    frames: FrameController,
    gpu: Option<Gpu<A>>,
    lost_reported: bool,
}

impl<A: GpuApi> Application<A> {
    pub fn new(api: A, config: AppConfig) -> Self {
        let frames = FrameController::new(config.clear_color);
        Self {
            api,
            config,
            health: Arc::new(DeviceHealth::default()),
            frames,
            gpu: None,
            lost_reported: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn health(&self) -> &DeviceHealth {
        &self.health
    }

    pub fn frames(&self) -> &FrameController {
        &self.frames
    }

    /// Brings up instance, adapter, device and surface for a `width` x `height`
    /// drawable. On error nothing is retained.
    pub fn initialize(
        &mut self,
        target: A::SurfaceTarget,
        width: u32,
        height: u32,
    ) -> Result<(), InitError> {
        if self.gpu.is_some() {
            return Err(InitError::AlreadyInitialized);
        }

        let api = &self.api;
        let instance = create_instance(api, &self.config.instance)?;
        let surface = api.create_surface(&instance, target)?;

        let adapter = request_adapter(api, &instance, &self.config.adapter, &surface)?;
        drop(instance);

        // Each device gets its own health record; a loss reported by a
        // previous device must not leak into this one.
        let health = Arc::new(DeviceHealth::default());
        let (device, queue) = request_device(api, &adapter, &self.config.device, &health)?;

        let mut binder = SurfaceBinder::new(api, &surface, &adapter, self.config.surface.clone());
        binder
            .configure(api, &surface, &device, width, height)
            .map_err(InitError::Configure)?;
        drop(adapter);

        self.health = health;
        self.lost_reported = false;
        self.gpu = Some(Gpu {
            device,
            queue,
            surface,
            binder,
        });

        log::info!("graphics context initialized");
        Ok(())
    }

    /// True between a successful [`initialize`](Self::initialize) and
    /// [`terminate`](Self::terminate), unless the device was lost.
    pub fn is_running(&self) -> bool {
        self.gpu.is_some() && !self.health.is_lost()
    }

    /// Records a new drawable size and reconfigures the surface.
    ///
    /// A rejected size (e.g. a minimized window) leaves the surface stale;
    /// frames are skipped until a later size is accepted.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        if let Err(e) = gpu
            .binder
            .configure(&self.api, &gpu.surface, &gpu.device, width, height)
        {
            log::warn!("surface reconfiguration deferred: {e}");
        }
    }

    /// Runs one frame tick.
    pub fn main_loop(&mut self) -> FrameOutcome {
        let Some(gpu) = self.gpu.as_mut() else {
            return FrameOutcome::NotReady;
        };

        if self.health.is_lost() {
            if !self.lost_reported {
                log::error!("device lost; no further frames will be submitted");
                self.lost_reported = true;
            }
            return FrameOutcome::DeviceLost;
        }

        if gpu.binder.is_stale() {
            if let Err(e) = gpu.binder.reconfigure(&self.api, &gpu.surface, &gpu.device) {
                log::debug!("surface still unavailable: {e}");
                return FrameOutcome::SurfaceUnavailable;
            }
        }

        let outcome = self.frames.run(
            &self.api,
            FrameTarget {
                device: &gpu.device,
                queue: &gpu.queue,
                surface: &gpu.surface,
            },
        );

        match outcome {
            FrameOutcome::Presented { suboptimal: true } => gpu.binder.mark_stale(),
            FrameOutcome::Skipped(e) if e.needs_reconfigure() => gpu.binder.mark_stale(),
            _ => {}
        }

        outcome
    }

    /// Releases the long-lived handles: surface unconfigured, then queue,
    /// surface and device. Calling it again does nothing.
    pub fn terminate(&mut self) {
        let Some(gpu) = self.gpu.take() else {
            return;
        };

        let Gpu {
            device,
            queue,
            surface,
            binder: _,
        } = gpu;

        self.api.unconfigure_surface(&surface);
        drop(queue);
        drop(surface);
        drop(device);

        log::info!(
            "graphics context terminated after {} frames ({} skipped)",
            self.frames.frames_presented(),
            self.frames.frames_skipped()
        );
    }
}

impl<A: GpuApi> Drop for Application<A> {
    fn drop(&mut self) {
        self.terminate();
    }
}
