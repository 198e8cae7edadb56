use super::api::{GpuApi, SurfaceSupport};
use super::error::ConfigureError;
use super::init::SurfaceSettings;

/// Owns the surface configuration policy and the current configuration.
///
/// Surface support is captured from the adapter once, so the binder can
/// reconfigure after the adapter has been released.
#[derive(Debug, Clone)]
pub struct SurfaceBinder {
    settings: SurfaceSettings,
    support: SurfaceSupport,
    current: Option<wgpu::SurfaceConfiguration>,
    requested: (u32, u32),
    stale: bool,
}

impl SurfaceBinder {
    pub fn new<A: GpuApi>(
        api: &A,
        surface: &A::Surface,
        adapter: &A::Adapter,
        settings: SurfaceSettings,
    ) -> Self {
        Self::with_support(api.surface_support(surface, adapter), settings)
    }

    pub fn with_support(support: SurfaceSupport, settings: SurfaceSettings) -> Self {
        Self {
            settings,
            support,
            current: None,
            requested: (0, 0),
            stale: true,
        }
    }

    /// Builds the configuration for a `width` x `height` drawable without applying it.
    pub fn build_config(
        &self,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, ConfigureError> {
        if width == 0 || height == 0 {
            return Err(ConfigureError::ZeroSize { width, height });
        }

        let max = self.support.max_dimension;
        if width > max || height > max {
            return Err(ConfigureError::TooLarge { width, height, max });
        }

        let format = choose_surface_format(&self.support, self.settings.prefer_srgb)
            .ok_or(ConfigureError::NoSupportedFormat)?;

        let present_mode = self.settings.present_mode;
        if !self.support.present_modes.contains(&present_mode) {
            return Err(ConfigureError::PresentModeUnsupported(present_mode));
        }

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode: choose_alpha_mode(&self.support, self.settings.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: self.settings.desired_maximum_frame_latency,
        })
    }

    /// Configures the surface for a `width` x `height` drawable.
    ///
    /// On failure the previous configuration is no longer trusted and the
    /// binder stays stale until a later call succeeds.
    pub fn configure<A: GpuApi>(
        &mut self,
        api: &A,
        surface: &A::Surface,
        device: &A::Device,
        width: u32,
        height: u32,
    ) -> Result<(), ConfigureError> {
        self.requested = (width, height);

        match self.build_config(width, height) {
            Ok(config) => {
                api.configure_surface(surface, device, &config);
                log::info!(
                    "surface configured: {}x{} {:?} {:?}",
                    config.width,
                    config.height,
                    config.format,
                    config.present_mode
                );
                self.current = Some(config);
                self.stale = false;
                Ok(())
            }
            Err(e) => {
                self.stale = true;
                Err(e)
            }
        }
    }

    /// Re-applies the most recently requested size.
    pub fn reconfigure<A: GpuApi>(
        &mut self,
        api: &A,
        surface: &A::Surface,
        device: &A::Device,
    ) -> Result<(), ConfigureError> {
        let (width, height) = self.requested;
        self.configure(api, surface, device, width, height)
    }

    /// Requests a reconfiguration before the next frame.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The configuration frames may render against, if any.
    pub fn current(&self) -> Option<&wgpu::SurfaceConfiguration> {
        if self.stale {
            None
        } else {
            self.current.as_ref()
        }
    }

    pub fn requested_size(&self) -> (u32, u32) {
        self.requested
    }
}

/// Picks the surface's preferred (first) format, or its first sRGB format
/// when `prefer_srgb` is set and one exists.
pub(crate) fn choose_surface_format(
    support: &SurfaceSupport,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = support.formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }

    support.formats.first().copied()
}

/// Uses the requested alpha mode when the surface supports it, otherwise the
/// platform default.
pub(crate) fn choose_alpha_mode(
    support: &SurfaceSupport,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| support.alpha_modes.contains(m))
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
