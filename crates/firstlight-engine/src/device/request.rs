use std::sync::{Arc, Weak};

use super::api::GpuApi;
use super::bridge::wait_driven;
use super::error::InitError;
use super::health::{self, DeviceHealth};
use super::init::{AdapterCriteria, DeviceSpec};

/// Selects an adapter able to present to `compatible_surface`.
///
/// Blocks until the backend reports completion, driving the instance's event
/// dispatch in the meantime.
pub fn request_adapter<A: GpuApi>(
    api: &A,
    instance: &A::Instance,
    criteria: &AdapterCriteria,
    compatible_surface: &A::Surface,
) -> Result<A::Adapter, InitError> {
    log::info!("requesting adapter...");

    let pending = api.request_adapter(instance, criteria, compatible_surface);
    let outcome = wait_driven(pending, || api.poll_instance(instance));
    let adapter = outcome.map_err(InitError::Adapter)?;

    log::info!("got adapter: {}", api.describe_adapter(&adapter));
    Ok(adapter)
}

/// Creates the logical device and its queue.
///
/// Registers the device-lost handler with the request and the
/// uncaptured-error handler once the device exists. Both report into
/// `health` through a weak reference.
pub fn request_device<A: GpuApi>(
    api: &A,
    adapter: &A::Adapter,
    spec: &DeviceSpec,
    health: &Arc<DeviceHealth>,
) -> Result<(A::Device, A::Queue), InitError> {
    log::info!("requesting device...");

    let weak: Weak<DeviceHealth> = Arc::downgrade(health);
    let pending = api.request_device(adapter, spec, health::device_lost_handler(weak.clone()));
    let outcome = wait_driven(pending, || api.poll_adapter(adapter));
    let (device, queue) = outcome.map_err(InitError::Device)?;

    api.set_uncaptured_error_handler(&device, health::uncaptured_error_handler(weak));

    log::info!("got device \"{}\"", spec.label);
    Ok((device, queue))
}
