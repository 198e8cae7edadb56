use super::api::GpuApi;
use super::error::AcquireError;

/// Stage of the frame currently being produced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameState {
    Idle,
    Acquiring,
    Encoding,
    Submitted,
    Presented,
}

/// Result of one frame tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Work was submitted and the image handed back for presentation.
    Presented {
        /// The surface asked to be reconfigured before the next frame.
        suboptimal: bool,
    },
    /// Acquisition failed; nothing was recorded or submitted.
    Skipped(AcquireError),
    /// No valid surface configuration; the frame was not attempted.
    SurfaceUnavailable,
    /// The context has not been initialized (or was terminated).
    NotReady,
    /// The device reported itself lost; no further work is issued.
    DeviceLost,
}

/// Long-lived handles a frame renders through.
pub struct FrameTarget<'a, A: GpuApi> {
    pub device: &'a A::Device,
    pub queue: &'a A::Queue,
    pub surface: &'a A::Surface,
}

/// Per-frame handles that outlive a single step.
///
/// Fields drop in declaration order, so the view is always released before
/// the image it was derived from, on every exit path.
struct FrameArena<A: GpuApi> {
    view: A::TextureView,
    texture: A::SurfaceTexture,
}

impl<A: GpuApi> FrameArena<A> {
    /// Releases the view and hands back the image for presentation.
    fn into_texture(self) -> A::SurfaceTexture {
        let Self { view, texture } = self;
        drop(view);
        texture
    }
}

/// Drives the acquire / encode / submit / present cycle.
#[derive(Debug)]
pub struct FrameController {
    state: FrameState,
    clear_color: wgpu::Color,
    presented: u64,
    skipped: u64,
}

impl FrameController {
    pub fn new(clear_color: wgpu::Color) -> Self {
        Self {
            state: FrameState::Idle,
            clear_color,
            presented: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn frames_skipped(&self) -> u64 {
        self.skipped
    }

    /// Produces one frame. Always returns with the controller back in `Idle`.
    pub fn run<A: GpuApi>(&mut self, api: &A, target: FrameTarget<'_, A>) -> FrameOutcome {
        let outcome = self.step(api, &target);
        self.state = FrameState::Idle;
        outcome
    }

    fn step<A: GpuApi>(&mut self, api: &A, target: &FrameTarget<'_, A>) -> FrameOutcome {
        self.state = FrameState::Acquiring;
        let acquired = match api.acquire_texture(target.surface) {
            Ok(acquired) => acquired,
            Err(e) => {
                self.skipped += 1;
                log::debug!("skipping frame: {e}");
                return FrameOutcome::Skipped(e);
            }
        };

        let suboptimal = acquired.is_suboptimal();
        let texture = acquired.into_inner();
        let arena: FrameArena<A> = FrameArena {
            view: api.create_view(&texture),
            texture,
        };

        self.state = FrameState::Encoding;
        let mut encoder = api.create_encoder(target.device, "firstlight frame encoder");
        api.record_clear_pass(&mut encoder, &arena.view, self.clear_color);
        let commands = api.finish(encoder);

        self.state = FrameState::Submitted;
        log::trace!("submitting command buffer");
        api.submit(target.queue, commands);
        let texture = arena.into_texture();

        self.state = FrameState::Presented;
        let host = api.host_model();
        if host.presents_explicitly() {
            api.present(texture);
        } else {
            drop(texture);
        }

        if host.dispatches_explicitly() {
            api.poll_device(target.device);
        }

        self.presented += 1;
        FrameOutcome::Presented { suboptimal }
    }
}
