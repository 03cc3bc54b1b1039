//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single application window, and drives
//! the [`App`](crate::core::App) callbacks from it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
