/// Drawable size used when the window collaborator does not report one.
pub const DEFAULT_SURFACE_SIZE: (u32, u32) = (640, 480);

/// Clear color of the single render pass: opaque red.
pub const DEFAULT_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Instance creation parameters.
///
/// `backend_options` is handed to the runtime untouched; this layer does not
/// interpret backend toggles.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub backends: wgpu::Backends,
    pub flags: wgpu::InstanceFlags,
    pub backend_options: wgpu::BackendOptions,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::from_build_config(),
            backend_options: wgpu::BackendOptions::default(),
        }
    }
}

/// Adapter selection criteria.
///
/// The compatible surface is not part of this struct; it is always supplied
/// by the caller so the chosen adapter can present to it.
#[derive(Debug, Clone)]
pub struct AdapterCriteria {
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
}

impl Default for AdapterCriteria {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
        }
    }
}

/// Logical device request.
#[derive(Debug, Clone)]
pub struct DeviceSpec {
    pub label: String,

    /// Favor an empty set for portability unless a feature is strictly necessary.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,
}

impl Default for DeviceSpec {
    fn default() -> Self {
        Self {
            label: "firstlight device".to_string(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

/// Surface configuration preferences.
#[derive(Debug, Clone)]
pub struct SurfaceSettings {
    /// Prefer an sRGB format over the surface's first (preferred) format.
    pub prefer_srgb: bool,

    /// FIFO never tears and never skips frames.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode. `None`, or a mode the surface does not list,
    /// means the platform default.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
        }
    }
}
