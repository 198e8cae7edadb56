//! firstlight engine crate.
//!
//! Brings up a wgpu context, binds it to a window surface and clears that
//! surface once per tick.

pub mod core;
pub mod device;
pub mod logging;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub mod window;
