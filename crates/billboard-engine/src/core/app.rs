use anyhow::Result;

use crate::gfx::Graphics;
use crate::input::Key;

/// Application contract implemented by demos.
///
/// The host calls the `create_*` callbacks once at startup (in [`Stage`]
/// order) and the matching `release_*` callbacks once at shutdown, in reverse.
/// Per displayed frame it delivers pending key events, then calls
/// [`on_update`] and [`on_frame`].
///
/// Any `Err` stops the run; the host then releases the stages that were
/// created and returns the error from the run loop.
///
/// [`Stage`]: crate::core::Stage
/// [`on_update`]: App::on_update
/// [`on_frame`]: App::on_frame
pub trait App {
    fn on_create_constant_buffers(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_release_constant_buffers(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_create_shaders(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_release_shaders(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_create_textures(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_release_textures(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_create_materials(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_release_materials(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_create_meshes(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    fn on_release_meshes(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let _ = gfx;
        Ok(())
    }

    /// Called after startup and whenever the drawable size changes. Both
    /// dimensions are non-zero.
    fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        let _ = (width, height);
        Ok(())
    }

    /// Called for each key transition, including platform key repeats.
    fn on_key_event(&mut self, key: Key, is_down: bool, is_alt_down: bool) -> Result<()> {
        let _ = (key, is_down, is_alt_down);
        Ok(())
    }

    /// Called once per acquired frame, before [`on_frame`](App::on_frame).
    fn on_update(&mut self) -> Result<()> {
        Ok(())
    }

    /// Records the frame. The target has already been cleared.
    fn on_frame(&mut self, gfx: &mut dyn Graphics) -> Result<()>;
}
