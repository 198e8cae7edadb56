use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::api::{DeviceLostHandler, ErrorKind, LostReason, UncapturedErrorHandler};

/// Device status written by the standing handlers.
///
/// The owning context holds the only strong reference; handlers hold a
/// `Weak` and resolve it each time they fire.
#[derive(Debug, Default)]
pub struct DeviceHealth {
    lost: AtomicBool,
    uncaptured_errors: AtomicU64,
}

impl DeviceHealth {
    /// True once the device-lost handler has fired.
    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }

    /// Number of uncaptured errors reported so far.
    pub fn uncaptured_errors(&self) -> u64 {
        self.uncaptured_errors.load(Ordering::Relaxed)
    }

    fn mark_lost(&self) {
        self.lost.store(true, Ordering::Release);
    }

    fn record_error(&self) {
        self.uncaptured_errors.fetch_add(1, Ordering::Relaxed);
    }
}

fn with_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}

/// Builds the standing device-lost handler.
pub(crate) fn device_lost_handler(health: Weak<DeviceHealth>) -> DeviceLostHandler {
    Box::new(move |reason: LostReason, message: String| {
        log::error!("device lost: reason {reason:?}{}", with_message(&message));
        match health.upgrade() {
            Some(health) => health.mark_lost(),
            None => log::debug!("device-lost notification for a dropped context"),
        }
    })
}

/// Builds the standing uncaptured-error handler.
pub(crate) fn uncaptured_error_handler(health: Weak<DeviceHealth>) -> UncapturedErrorHandler {
    Arc::new(move |kind: ErrorKind, message: String| {
        log::error!("uncaptured device error: type {kind:?}{}", with_message(&message));
        if let Some(health) = health.upgrade() {
            health.record_error();
        }
    })
}
