//! Recording backend for lifecycle tests.
//!
//! Every handle is a [`Handle`] that journals its creation and its release,
//! and adapter/device completions are only delivered from the dispatch steps,
//! after a configurable number of polls.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::api::{
    Acquired, DeviceLostHandler, ErrorKind, GpuApi, HostModel, LostReason, Pending, SurfaceSupport,
    UncapturedErrorHandler,
};
use super::completion;
use super::error::{AcquireError, InitError, RequestError};
use super::init::{AdapterCriteria, DeviceSpec, InstanceConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Kind {
    Instance,
    Surface,
    Adapter,
    Device,
    Queue,
    SurfaceTexture,
    TextureView,
    CommandEncoder,
    CommandBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Created(Kind),
    Released(Kind),
    Polled(Kind),
    AdapterCallback,
    DeviceCallback,
    Configured {
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        present_mode: wgpu::PresentMode,
        alpha_mode: wgpu::CompositeAlphaMode,
    },
    Unconfigured,
    Acquire,
    ClearPass(wgpu::Color),
    Submitted,
    Presented,
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub struct Handle {
    kind: Kind,
    journal: Journal,
}

impl Handle {
    fn new(kind: Kind, journal: &Journal) -> Self {
        journal.borrow_mut().push(Event::Created(kind));
        Self {
            kind,
            journal: Rc::clone(journal),
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(Event::Released(self.kind));
    }
}

/// Scripted outcome of one acquisition.
#[derive(Debug, Copy, Clone)]
pub enum Step {
    Ready,
    Suboptimal,
    Fail(AcquireError),
}

type Callback = Box<dyn FnOnce()>;

pub struct MockApi {
    journal: Journal,
    host: HostModel,
    support: SurfaceSupport,
    instance_fails: bool,
    surface_fails: bool,
    adapter_outcome: Result<(), RequestError>,
    device_outcome: Result<(), RequestError>,
    completion_delay: usize,
    acquire_script: RefCell<VecDeque<Step>>,
    pending: RefCell<Vec<(usize, Callback)>>,
    lost_handler: RefCell<Option<DeviceLostHandler>>,
    error_handler: RefCell<Option<UncapturedErrorHandler>>,
}

pub fn default_support() -> SurfaceSupport {
    SurfaceSupport {
        formats: vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ],
        present_modes: vec![wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox],
        alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
        max_dimension: 8192,
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            journal: Rc::new(RefCell::new(Vec::new())),
            host: HostModel::Native,
            support: default_support(),
            instance_fails: false,
            surface_fails: false,
            adapter_outcome: Ok(()),
            device_outcome: Ok(()),
            completion_delay: 2,
            acquire_script: RefCell::new(VecDeque::new()),
            pending: RefCell::new(Vec::new()),
            lost_handler: RefCell::new(None),
            error_handler: RefCell::new(None),
        }
    }

    pub fn cooperative(mut self) -> Self {
        self.host = HostModel::Cooperative;
        self
    }

    pub fn failing_instance(mut self) -> Self {
        self.instance_fails = true;
        self
    }

    pub fn failing_surface(mut self) -> Self {
        self.surface_fails = true;
        self
    }

    pub fn failing_adapter(mut self) -> Self {
        self.adapter_outcome = Err(RequestError::Failed("no adapter".to_string()));
        self
    }

    pub fn failing_device(mut self) -> Self {
        self.device_outcome = Err(RequestError::Failed("no device".to_string()));
        self
    }

    pub fn with_delay(mut self, polls: usize) -> Self {
        self.completion_delay = polls;
        self
    }

    pub fn with_support(mut self, support: SurfaceSupport) -> Self {
        self.support = support;
        self
    }

    /// Queues acquisition outcomes; once exhausted every acquisition succeeds.
    pub fn script(&self, steps: impl IntoIterator<Item = Step>) {
        self.acquire_script.borrow_mut().extend(steps);
    }

    /// A free-standing handle, for driving components without a full bring-up.
    pub fn handle(&self, kind: Kind) -> Handle {
        Handle::new(kind, &self.journal)
    }

    pub fn journal(&self) -> Journal {
        Rc::clone(&self.journal)
    }

    pub fn events(&self) -> Vec<Event> {
        self.journal.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn count(&self, event: &Event) -> usize {
        count(&self.journal.borrow(), event)
    }

    pub fn lose_device(&self, message: &str) {
        if let Some(handler) = self.lost_handler.borrow().as_ref() {
            handler(LostReason::Unknown, message.to_string());
        }
    }

    pub fn raise_error(&self, kind: ErrorKind, message: &str) {
        let handler = self.error_handler.borrow().clone();
        if let Some(handler) = handler {
            handler(kind, message.to_string());
        }
    }

    fn schedule(&self, callback: impl FnOnce() + 'static) {
        self.pending
            .borrow_mut()
            .push((self.completion_delay, Box::new(callback)));
    }

    fn dispatch(&self, kind: Kind) {
        self.journal.borrow_mut().push(Event::Polled(kind));

        let ready: Vec<Callback> = {
            let mut pending = self.pending.borrow_mut();
            let mut ready = Vec::new();
            let mut waiting = Vec::new();
            for (remaining, callback) in pending.drain(..) {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    ready.push(callback);
                } else {
                    waiting.push((remaining, callback));
                }
            }
            *pending = waiting;
            ready
        };

        for callback in ready {
            callback();
        }
    }
}

pub fn count(events: &[Event], event: &Event) -> usize {
    events.iter().filter(|e| *e == event).count()
}

impl GpuApi for MockApi {
    type SurfaceTarget = ();

    type Instance = Handle;
    type Adapter = Handle;
    type Device = Handle;
    type Queue = Handle;
    type Surface = Handle;
    type SurfaceTexture = Handle;
    type TextureView = Handle;
    type CommandEncoder = Handle;
    type CommandBuffer = Handle;

    fn host_model(&self) -> HostModel {
        self.host
    }

    fn create_instance(&self, config: &InstanceConfig) -> Result<Handle, InitError> {
        if self.instance_fails {
            return Err(InitError::NoBackend(config.backends));
        }
        Ok(Handle::new(Kind::Instance, &self.journal))
    }

    fn create_surface(&self, _instance: &Handle, _target: ()) -> Result<Handle, InitError> {
        if self.surface_fails {
            return Err(InitError::Surface("window has no presentable handle".to_string()));
        }
        Ok(Handle::new(Kind::Surface, &self.journal))
    }

    fn request_adapter<'a>(
        &'a self,
        _instance: &'a Handle,
        _criteria: &AdapterCriteria,
        _compatible_surface: &'a Handle,
    ) -> Pending<'a, Result<Handle, RequestError>> {
        let (resolver, promise) = completion::promise();
        let journal = self.journal();
        let outcome = self.adapter_outcome.clone();

        self.schedule(move || {
            journal.borrow_mut().push(Event::AdapterCallback);
            resolver.resolve(outcome.map(|()| Handle::new(Kind::Adapter, &journal)));
        });

        Box::pin(async move { promise.await.unwrap_or(Err(RequestError::Abandoned)) })
    }

    fn poll_instance(&self, _instance: &Handle) {
        self.dispatch(Kind::Instance);
    }

    fn describe_adapter(&self, _adapter: &Handle) -> String {
        "mock adapter".to_string()
    }

    fn request_device<'a>(
        &'a self,
        _adapter: &'a Handle,
        _spec: &DeviceSpec,
        on_lost: DeviceLostHandler,
    ) -> Pending<'a, Result<(Handle, Handle), RequestError>> {
        *self.lost_handler.borrow_mut() = Some(on_lost);

        let (resolver, promise) = completion::promise();
        let journal = self.journal();
        let outcome = self.device_outcome.clone();

        self.schedule(move || {
            journal.borrow_mut().push(Event::DeviceCallback);
            resolver.resolve(outcome.map(|()| {
                (
                    Handle::new(Kind::Device, &journal),
                    Handle::new(Kind::Queue, &journal),
                )
            }));
        });

        Box::pin(async move { promise.await.unwrap_or(Err(RequestError::Abandoned)) })
    }

    fn poll_adapter(&self, _adapter: &Handle) {
        self.dispatch(Kind::Adapter);
    }

    fn set_uncaptured_error_handler(&self, _device: &Handle, handler: UncapturedErrorHandler) {
        *self.error_handler.borrow_mut() = Some(handler);
    }

    fn surface_support(&self, _surface: &Handle, _adapter: &Handle) -> SurfaceSupport {
        self.support.clone()
    }

    fn configure_surface(
        &self,
        _surface: &Handle,
        _device: &Handle,
        config: &wgpu::SurfaceConfiguration,
    ) {
        self.journal.borrow_mut().push(Event::Configured {
            width: config.width,
            height: config.height,
            format: config.format,
            present_mode: config.present_mode,
            alpha_mode: config.alpha_mode,
        });
    }

    fn unconfigure_surface(&self, _surface: &Handle) {
        self.journal.borrow_mut().push(Event::Unconfigured);
    }

    fn acquire_texture(&self, _surface: &Handle) -> Result<Acquired<Handle>, AcquireError> {
        self.journal.borrow_mut().push(Event::Acquire);
        let next = self.acquire_script.borrow_mut().pop_front();
        match next.unwrap_or(Step::Ready) {
            Step::Ready => Ok(Acquired::Ready(Handle::new(Kind::SurfaceTexture, &self.journal))),
            Step::Suboptimal => Ok(Acquired::Suboptimal(Handle::new(
                Kind::SurfaceTexture,
                &self.journal,
            ))),
            Step::Fail(e) => Err(e),
        }
    }

    fn create_view(&self, _texture: &Handle) -> Handle {
        Handle::new(Kind::TextureView, &self.journal)
    }

    fn create_encoder(&self, _device: &Handle, _label: &str) -> Handle {
        Handle::new(Kind::CommandEncoder, &self.journal)
    }

    fn record_clear_pass(&self, _encoder: &mut Handle, _view: &Handle, color: wgpu::Color) {
        self.journal.borrow_mut().push(Event::ClearPass(color));
    }

    fn finish(&self, encoder: Handle) -> Handle {
        let commands = Handle::new(Kind::CommandBuffer, &self.journal);
        drop(encoder);
        commands
    }

    fn submit(&self, _queue: &Handle, commands: Handle) {
        self.journal.borrow_mut().push(Event::Submitted);
        drop(commands);
    }

    fn present(&self, texture: Handle) {
        self.journal.borrow_mut().push(Event::Presented);
        drop(texture);
    }

    fn poll_device(&self, _device: &Handle) {
        self.dispatch(Kind::Device);
    }
}
