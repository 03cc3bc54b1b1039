//! Billboard engine crate.
//!
//! A small teaching render host. It owns the window, the GPU device, the render
//! loop and every GPU resource; applications only see typed handles and a fixed
//! set of lifecycle callbacks (see [`core::App`]).

pub mod core;
pub mod device;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod math;
pub mod window;

use anyhow::Result;
use winit::dpi::LogicalSize;

use crate::core::App;
use crate::device::GpuInit;
use crate::window::{Runtime, RuntimeConfig};

/// Opens a `width` x `height` window titled `title` and drives `app` until the
/// window is closed or a callback fails.
///
/// Blocks for the lifetime of the run. The first callback error is returned
/// after the paired release callbacks have run.
pub fn run_application<A>(width: u32, height: u32, title: &str, app: A) -> Result<()>
where
    A: App + 'static,
{
    let config = RuntimeConfig {
        title: title.to_string(),
        initial_size: LogicalSize::new(width as f64, height as f64),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), app)
}
