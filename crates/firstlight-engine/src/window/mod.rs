//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single window, and wires them to the
//! application lifecycle.

mod runtime;

pub use runtime::{PlatformWindow, Runtime, WindowConfig};
