use crate::device::{
    AdapterCriteria, DEFAULT_CLEAR_COLOR, DeviceSpec, InstanceConfig, SurfaceSettings,
};

/// Everything [`Application`](super::Application) needs besides the surface target.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub instance: InstanceConfig,
    pub adapter: AdapterCriteria,
    pub device: DeviceSpec,
    pub surface: SurfaceSettings,

    /// Color the single render pass clears to.
    pub clear_color: wgpu::Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance: InstanceConfig::default(),
            adapter: AdapterCriteria::default(),
            device: DeviceSpec::default(),
            surface: SurfaceSettings::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}
