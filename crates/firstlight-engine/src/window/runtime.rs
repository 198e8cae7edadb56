use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::core::{AppConfig, Application};
use crate::device::{DEFAULT_SURFACE_SIZE, PresentTarget, WgpuApi};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let (width, height) = DEFAULT_SURFACE_SIZE;
        Self {
            title: "firstlight".to_string(),
            size: PhysicalSize::new(width, height),
            resizable: false,
        }
    }
}

struct WindowState {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    close_requested: bool,
    resized: Option<PhysicalSize<u32>>,
    error: Option<anyhow::Error>,
}

impl WindowState {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            close_requested: false,
            resized: None,
            error: None,
        }
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                self.error = Some(anyhow::Error::new(e).context("failed to create window"));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(size) => self.resized = Some(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    self.resized = Some(window.inner_size());
                }
            }
            _ => {}
        }
    }
}

/// A single platform window whose events are pumped once per tick.
pub struct PlatformWindow {
    event_loop: EventLoop<()>,
    state: WindowState,
}

impl PlatformWindow {
    /// Creates the event loop and blocks until the window exists.
    pub fn open(config: WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut this = Self {
            event_loop,
            state: WindowState::new(config),
        };

        while this.state.window.is_none() {
            let status = this.pump(Some(Duration::from_millis(16)));
            if let Some(e) = this.state.error.take() {
                return Err(e);
            }
            if let PumpStatus::Exit(code) = status {
                bail!("event loop exited with code {code} before the window opened");
            }
        }

        Ok(this)
    }

    fn pump(&mut self, timeout: Option<Duration>) -> PumpStatus {
        self.event_loop.pump_app_events(timeout, &mut self.state)
    }

    /// Processes pending window events without blocking.
    pub fn poll_events(&mut self) {
        if let PumpStatus::Exit(_) = self.pump(Some(Duration::ZERO)) {
            self.state.close_requested = true;
        }
    }

    pub fn should_close(&self) -> bool {
        self.state.close_requested
    }

    /// Returns the latest drawable size reported since the previous call.
    pub fn take_resize(&mut self) -> Option<PhysicalSize<u32>> {
        self.state.resized.take()
    }

    pub fn drawable_size(&self) -> PhysicalSize<u32> {
        self.state
            .window
            .as_ref()
            .map(|w| w.inner_size())
            .unwrap_or(self.state.config.size)
    }

    /// Raw presentable target for surface creation.
    pub fn surface_target(&self) -> Result<Arc<dyn PresentTarget>> {
        let window = self.state.window.as_ref().context("window is not open")?;
        let target: Arc<dyn PresentTarget> = window.clone();
        Ok(target)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, brings up the GPU context and renders until the
    /// window closes or the device is lost.
    pub fn run(window_config: WindowConfig, app_config: AppConfig) -> Result<()> {
        let mut window = PlatformWindow::open(window_config)?;
        let size = window.drawable_size();

        let mut app = Application::new(WgpuApi::new(), app_config);
        app.initialize(window.surface_target()?, size.width, size.height)
            .context("failed to initialize the graphics context")?;

        log::info!("entering main loop");
        while app.is_running() {
            window.poll_events();
            if window.should_close() {
                break;
            }
            if let Some(size) = window.take_resize() {
                app.resize(size.width, size.height);
            }
            app.main_loop();
        }
        log::info!("main loop finished");

        app.terminate();
        Ok(())
    }
}
