//! GPU device + surface management.
//!
//! Owns the wgpu instance, adapter, device and queue, the window surface and
//! the depth attachment that matches it. Frames are acquired, cleared and
//! presented here; drawing into them goes through [`crate::gfx`].

mod error;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame, DEPTH_FORMAT};
pub use init::GpuInit;
