use super::api::GpuApi;
use super::error::InitError;
use super::init::InstanceConfig;

/// Creates the runtime instance.
///
/// The instance is only needed until an adapter has been selected; callers
/// drop it right after [`request_adapter`](super::request_adapter) returns.
pub fn create_instance<A: GpuApi>(
    api: &A,
    config: &InstanceConfig,
) -> Result<A::Instance, InitError> {
    log::debug!("creating instance (backends: {:?})", config.backends);
    let instance = api.create_instance(config)?;
    log::info!("instance created");
    Ok(instance)
}
