//! Keyboard input.
//!
//! Applications see [`Key`] and [`Modifiers`] only; the winit translation
//! lives in [`platform`] and is driven by the runtime.

pub mod platform;
mod types;

pub use types::{Key, KeyEvent, KeyState, Modifiers};
