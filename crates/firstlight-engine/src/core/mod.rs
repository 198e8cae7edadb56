//! Application lifecycle.
//!
//! [`Application`] is the stable surface between the platform loop and the GPU
//! layer: it owns the long-lived handles and exposes the
//! initialize / main-loop / terminate contract.

mod app;
mod config;

pub use app::Application;
pub use config::AppConfig;
