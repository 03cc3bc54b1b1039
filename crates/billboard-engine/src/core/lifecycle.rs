use std::fmt;

use anyhow::{Context, Result};

use crate::gfx::Graphics;

use super::app::App;

/// Resource stage with a paired create/release callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    ConstantBuffers,
    Shaders,
    Textures,
    Materials,
    Meshes,
}

impl Stage {
    /// Startup order. Materials reference shaders, buffers and textures;
    /// meshes reference materials.
    pub const STARTUP: [Stage; 5] = [
        Stage::ConstantBuffers,
        Stage::Shaders,
        Stage::Textures,
        Stage::Materials,
        Stage::Meshes,
    ];

    fn create<A: App + ?Sized>(self, app: &mut A, gfx: &mut dyn Graphics) -> Result<()> {
        match self {
            Stage::ConstantBuffers => app.on_create_constant_buffers(gfx),
            Stage::Shaders => app.on_create_shaders(gfx),
            Stage::Textures => app.on_create_textures(gfx),
            Stage::Materials => app.on_create_materials(gfx),
            Stage::Meshes => app.on_create_meshes(gfx),
        }
    }

    fn release<A: App + ?Sized>(self, app: &mut A, gfx: &mut dyn Graphics) -> Result<()> {
        match self {
            Stage::ConstantBuffers => app.on_release_constant_buffers(gfx),
            Stage::Shaders => app.on_release_shaders(gfx),
            Stage::Textures => app.on_release_textures(gfx),
            Stage::Materials => app.on_release_materials(gfx),
            Stage::Meshes => app.on_release_meshes(gfx),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ConstantBuffers => "constant buffers",
            Stage::Shaders => "shaders",
            Stage::Textures => "textures",
            Stage::Materials => "materials",
            Stage::Meshes => "meshes",
        };
        f.write_str(name)
    }
}

/// Tracks which resource stages were created so that each one is released
/// exactly once, in reverse order.
#[derive(Debug, Default)]
pub struct Lifecycle {
    created: Vec<Stage>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages whose create callback succeeded and which are not yet released.
    pub fn created(&self) -> &[Stage] {
        &self.created
    }

    /// Runs the create callbacks in [`Stage::STARTUP`] order, stopping at the
    /// first failure. Stages already created stay recorded for [`shutdown`].
    ///
    /// [`shutdown`]: Lifecycle::shutdown
    pub fn startup<A: App + ?Sized>(&mut self, app: &mut A, gfx: &mut dyn Graphics) -> Result<()> {
        for stage in Stage::STARTUP {
            if self.created.contains(&stage) {
                continue;
            }
            stage
                .create(app, gfx)
                .with_context(|| format!("creating {stage} failed"))?;
            log::debug!("created {stage}");
            self.created.push(stage);
        }
        Ok(())
    }

    /// Releases every created stage, last created first. All stages are
    /// attempted; the first failure is returned.
    pub fn shutdown<A: App + ?Sized>(&mut self, app: &mut A, gfx: &mut dyn Graphics) -> Result<()> {
        let mut first_error = None;

        while let Some(stage) = self.created.pop() {
            match stage.release(app, gfx) {
                Ok(()) => log::debug!("released {stage}"),
                Err(e) => {
                    let e = e.context(format!("releasing {stage} failed"));
                    log::error!("{e:#}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::bail;

    use super::*;
    use crate::gfx::{
        BufferHandle, GfxError, GfxResult, MaterialHandle, MaterialInfo, MeshHandle, MeshInfo,
        PixelShaderHandle, TextureHandle, VertexShaderHandle,
    };

    struct NoGpu;

    impl Graphics for NoGpu {
        fn create_constant_buffer(&mut self, _: usize) -> GfxResult<BufferHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn upload_constant_buffer(&mut self, _: BufferHandle, _: &[u8]) -> GfxResult<()> {
            Ok(())
        }
        fn release_constant_buffer(&mut self, _: BufferHandle) -> GfxResult<()> {
            Ok(())
        }
        fn create_vertex_shader(&mut self, _: &Path, _: &str) -> GfxResult<VertexShaderHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn create_pixel_shader(&mut self, _: &Path, _: &str) -> GfxResult<PixelShaderHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn release_vertex_shader(&mut self, _: VertexShaderHandle) -> GfxResult<()> {
            Ok(())
        }
        fn release_pixel_shader(&mut self, _: PixelShaderHandle) -> GfxResult<()> {
            Ok(())
        }
        fn create_texture(&mut self, _: &Path) -> GfxResult<TextureHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn release_texture(&mut self, _: TextureHandle) -> GfxResult<()> {
            Ok(())
        }
        fn create_material(&mut self, _: &MaterialInfo) -> GfxResult<MaterialHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn release_material(&mut self, _: MaterialHandle) -> GfxResult<()> {
            Ok(())
        }
        fn create_mesh(&mut self, _: &MeshInfo<'_>) -> GfxResult<MeshHandle> {
            Err(GfxError::NoActiveFrame)
        }
        fn release_mesh(&mut self, _: MeshHandle) -> GfxResult<()> {
            Ok(())
        }
        fn set_alpha_blending(&mut self, _: bool) {}
        fn draw_mesh(&mut self, _: MeshHandle) -> GfxResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Journal {
        calls: Vec<String>,
        fail_create: Option<Stage>,
        fail_release: Option<Stage>,
    }

    impl Journal {
        fn step(&mut self, verb: &str, stage: Stage) -> Result<()> {
            self.calls.push(format!("{verb} {stage}"));
            let fail = match verb {
                "create" => self.fail_create,
                _ => self.fail_release,
            };
            if fail == Some(stage) {
                bail!("{verb} {stage} refused");
            }
            Ok(())
        }
    }

    impl App for Journal {
        fn on_create_constant_buffers(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("create", Stage::ConstantBuffers)
        }
        fn on_release_constant_buffers(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("release", Stage::ConstantBuffers)
        }
        fn on_create_shaders(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("create", Stage::Shaders)
        }
        fn on_release_shaders(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("release", Stage::Shaders)
        }
        fn on_create_textures(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("create", Stage::Textures)
        }
        fn on_release_textures(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("release", Stage::Textures)
        }
        fn on_create_materials(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("create", Stage::Materials)
        }
        fn on_release_materials(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("release", Stage::Materials)
        }
        fn on_create_meshes(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("create", Stage::Meshes)
        }
        fn on_release_meshes(&mut self, _: &mut dyn Graphics) -> Result<()> {
            self.step("release", Stage::Meshes)
        }
        fn on_frame(&mut self, _: &mut dyn Graphics) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn startup_then_shutdown_mirrors_order() {
        let mut app = Journal::default();
        let mut lifecycle = Lifecycle::new();

        lifecycle.startup(&mut app, &mut NoGpu).unwrap();
        assert_eq!(lifecycle.created(), &Stage::STARTUP);
        lifecycle.shutdown(&mut app, &mut NoGpu).unwrap();
        assert!(lifecycle.created().is_empty());

        assert_eq!(
            app.calls,
            [
                "create constant buffers",
                "create shaders",
                "create textures",
                "create materials",
                "create meshes",
                "release meshes",
                "release materials",
                "release textures",
                "release shaders",
                "release constant buffers",
            ]
        );
    }

    #[test]
    fn failed_startup_releases_only_created_stages() {
        let mut app = Journal {
            fail_create: Some(Stage::Textures),
            ..Journal::default()
        };
        let mut lifecycle = Lifecycle::new();

        let err = lifecycle.startup(&mut app, &mut NoGpu).unwrap_err();
        assert!(format!("{err:#}").contains("creating textures failed"));
        assert_eq!(lifecycle.created(), &[Stage::ConstantBuffers, Stage::Shaders]);

        lifecycle.shutdown(&mut app, &mut NoGpu).unwrap();
        assert_eq!(
            &app.calls[3..],
            ["release shaders", "release constant buffers"]
        );
    }

    #[test]
    fn shutdown_continues_past_a_failed_release() {
        let mut app = Journal {
            fail_release: Some(Stage::Materials),
            ..Journal::default()
        };
        let mut lifecycle = Lifecycle::new();
        lifecycle.startup(&mut app, &mut NoGpu).unwrap();

        let err = lifecycle.shutdown(&mut app, &mut NoGpu).unwrap_err();
        assert!(format!("{err:#}").contains("releasing materials failed"));
        assert_eq!(app.calls.len(), 10);
        assert_eq!(app.calls.last().map(String::as_str), Some("release constant buffers"));
    }

    #[test]
    fn second_shutdown_is_a_noop() {
        let mut app = Journal::default();
        let mut lifecycle = Lifecycle::new();
        lifecycle.startup(&mut app, &mut NoGpu).unwrap();
        lifecycle.shutdown(&mut app, &mut NoGpu).unwrap();
        let calls = app.calls.len();

        lifecycle.shutdown(&mut app, &mut NoGpu).unwrap();
        assert_eq!(app.calls.len(), calls);
    }
}
