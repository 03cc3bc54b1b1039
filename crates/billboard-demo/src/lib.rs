//! Normal-mapped billboard over a textured ground plane.
//!
//! All demo logic lives here; `main.rs` only configures logging and hands a
//! [`BillboardApp`] to the engine run loop.

pub mod app;
pub mod buffers;
pub mod camera;
pub mod config;
pub mod controls;
pub mod meshes;

pub use app::BillboardApp;
pub use config::DemoConfig;

pub const WINDOW_TITLE: &str = "Billboard + Normal Mapping Shader";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
