use anyhow::{Context, Result};
use billboard_engine::core::App;
use billboard_engine::gfx::{
    BufferHandle, GfxResult, Graphics, MaterialHandle, MaterialInfo, MeshHandle, MeshInfo,
    PixelShaderHandle, TextureHandle, VertexShaderHandle,
};
use billboard_engine::input::Key;
use billboard_engine::math::identity_matrix;
use glam::{Vec3, Vec4};

use crate::buffers::{BillboardPixelBuffer, BillboardVertexBuffer, GroundVertexBuffer};
use crate::camera::OrbitCamera;
use crate::config::DemoConfig;
use crate::controls::Action;
use crate::meshes::{
    BILLBOARD_INPUTS, BILLBOARD_VERTICES, GROUND_INPUTS, GROUND_VERTICES, QUAD_INDICES,
};

pub const BILLBOARD_SHADER: &str = "billboard.wgsl";
pub const GROUND_SHADER: &str = "textured.wgsl";
pub const VERTEX_ENTRY: &str = "vs_main";
pub const PIXEL_ENTRY: &str = "fs_main";

pub const TREE_TEXTURES: (&str, &str) = ("tree_color_map.dds", "tree_normal_map.png");
pub const WALL_TEXTURES: (&str, &str) = ("wall_color_map.dds", "wall_normal_map.dds");
pub const GROUND_TEXTURE: &str = "ground.dds";

pub const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, -20.0);
pub const AMBIENT_LIGHT: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);
pub const DIFFUSE_LIGHT: Vec4 = Vec4::new(0.7, 0.7, 0.7, 1.0);
pub const SPECULAR_COLOR: Vec4 = Vec4::ONE;
pub const SPECULAR_EXPONENT: f32 = 100.0;

#[derive(Default)]
struct ConstantBuffers {
    billboard_vertex: Option<BufferHandle>,
    billboard_pixel: Option<BufferHandle>,
    ground_vertex: Option<BufferHandle>,
}

#[derive(Default)]
struct Shaders {
    billboard_vertex: Option<VertexShaderHandle>,
    billboard_pixel: Option<PixelShaderHandle>,
    ground_vertex: Option<VertexShaderHandle>,
    ground_pixel: Option<PixelShaderHandle>,
}

#[derive(Default)]
struct Textures {
    color: Option<TextureHandle>,
    normal: Option<TextureHandle>,
    ground: Option<TextureHandle>,
}

#[derive(Default)]
struct Materials {
    billboard: Option<MaterialHandle>,
    ground: Option<MaterialHandle>,
}

#[derive(Default)]
struct Meshes {
    billboard: Option<MeshHandle>,
    ground: Option<MeshHandle>,
}

/// A normal-mapped billboard over a textured ground plane, seen from an
/// orbiting camera.
pub struct BillboardApp {
    config: DemoConfig,
    camera: OrbitCamera,
    show_ground: bool,

    buffers: ConstantBuffers,
    shaders: Shaders,
    textures: Textures,
    materials: Materials,
    meshes: Meshes,
}

impl BillboardApp {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            show_ground: config.show_ground,
            config,
            camera: OrbitCamera::default(),
            buffers: ConstantBuffers::default(),
            shaders: Shaders::default(),
            textures: Textures::default(),
            materials: Materials::default(),
            meshes: Meshes::default(),
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn show_ground(&self) -> bool {
        self.show_ground
    }

    /// Color and normal map file names for the configured billboard.
    pub fn billboard_textures(&self) -> (&'static str, &'static str) {
        if self.config.use_tree {
            TREE_TEXTURES
        } else {
            WALL_TEXTURES
        }
    }
}

/// Handle created by an earlier stage.
fn created<T>(handle: Option<T>, what: &str) -> Result<T> {
    handle.with_context(|| format!("{what} has not been created"))
}

/// Every release of a stage is attempted; the first failure is returned.
fn first_failure(results: impl IntoIterator<Item = GfxResult<()>>) -> Result<()> {
    let mut first = None;
    for result in results {
        if let Err(e) = result {
            log::error!("{e}");
            first.get_or_insert(e);
        }
    }
    match first {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

impl App for BillboardApp {
    fn on_create_constant_buffers(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        self.buffers.billboard_vertex = Some(gfx.create_constant_buffer_for::<BillboardVertexBuffer>()?);
        self.buffers.billboard_pixel = Some(gfx.create_constant_buffer_for::<BillboardPixelBuffer>()?);
        self.buffers.ground_vertex = Some(gfx.create_constant_buffer_for::<GroundVertexBuffer>()?);
        Ok(())
    }

    fn on_release_constant_buffers(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let buffers = std::mem::take(&mut self.buffers);
        first_failure(
            [buffers.billboard_vertex, buffers.billboard_pixel, buffers.ground_vertex]
                .into_iter()
                .flatten()
                .map(|handle| gfx.release_constant_buffer(handle)),
        )
    }

    fn on_create_shaders(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let billboard = self.config.shader_path(BILLBOARD_SHADER);
        let ground = self.config.shader_path(GROUND_SHADER);

        self.shaders.billboard_vertex = Some(gfx.create_vertex_shader(&billboard, VERTEX_ENTRY)?);
        self.shaders.billboard_pixel = Some(gfx.create_pixel_shader(&billboard, PIXEL_ENTRY)?);
        self.shaders.ground_vertex = Some(gfx.create_vertex_shader(&ground, VERTEX_ENTRY)?);
        self.shaders.ground_pixel = Some(gfx.create_pixel_shader(&ground, PIXEL_ENTRY)?);
        Ok(())
    }

    fn on_release_shaders(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let shaders = std::mem::take(&mut self.shaders);
        let mut results: Vec<_> = [shaders.billboard_vertex, shaders.ground_vertex]
            .into_iter()
            .flatten()
            .map(|handle| gfx.release_vertex_shader(handle))
            .collect();
        results.extend(
            [shaders.billboard_pixel, shaders.ground_pixel]
                .into_iter()
                .flatten()
                .map(|handle| gfx.release_pixel_shader(handle)),
        );
        first_failure(results)
    }

    fn on_create_textures(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let (color, normal) = self.billboard_textures();
        log::info!("billboard textures: {color}, {normal}");

        self.textures.color = Some(gfx.create_texture(&self.config.image_path(color))?);
        self.textures.normal = Some(gfx.create_texture(&self.config.image_path(normal))?);
        self.textures.ground = Some(gfx.create_texture(&self.config.image_path(GROUND_TEXTURE))?);
        Ok(())
    }

    fn on_release_textures(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let textures = std::mem::take(&mut self.textures);
        first_failure(
            [textures.color, textures.normal, textures.ground]
                .into_iter()
                .flatten()
                .map(|handle| gfx.release_texture(handle)),
        )
    }

    fn on_create_materials(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let ground_texture = created(self.textures.ground, "ground texture")?;
        let ground_buffer = created(self.buffers.ground_vertex, "ground vertex buffer")?;

        let billboard = MaterialInfo {
            textures: vec![
                created(self.textures.color, "color map")?,
                created(self.textures.normal, "normal map")?,
                ground_texture,
            ],
            vertex_constant_buffers: vec![created(
                self.buffers.billboard_vertex,
                "billboard vertex buffer",
            )?],
            pixel_constant_buffers: vec![created(
                self.buffers.billboard_pixel,
                "billboard pixel buffer",
            )?],
            vertex_shader: created(self.shaders.billboard_vertex, "billboard vertex shader")?,
            pixel_shader: created(self.shaders.billboard_pixel, "billboard pixel shader")?,
            input_elements: BILLBOARD_INPUTS.to_vec(),
        };

        let ground = MaterialInfo {
            textures: vec![ground_texture],
            vertex_constant_buffers: vec![ground_buffer],
            pixel_constant_buffers: Vec::new(),
            vertex_shader: created(self.shaders.ground_vertex, "ground vertex shader")?,
            pixel_shader: created(self.shaders.ground_pixel, "ground pixel shader")?,
            input_elements: GROUND_INPUTS.to_vec(),
        };

        self.materials.billboard = Some(gfx.create_material(&billboard)?);
        self.materials.ground = Some(gfx.create_material(&ground)?);
        Ok(())
    }

    fn on_release_materials(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let materials = std::mem::take(&mut self.materials);
        first_failure(
            [materials.billboard, materials.ground]
                .into_iter()
                .flatten()
                .map(|handle| gfx.release_material(handle)),
        )
    }

    fn on_create_meshes(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let billboard = MeshInfo {
            vertices: &BILLBOARD_VERTICES,
            indices: &QUAD_INDICES,
            material: created(self.materials.billboard, "billboard material")?,
        };
        let ground = MeshInfo {
            vertices: &GROUND_VERTICES,
            indices: &QUAD_INDICES,
            material: created(self.materials.ground, "ground material")?,
        };

        self.meshes.billboard = Some(gfx.create_mesh(&billboard)?);
        self.meshes.ground = Some(gfx.create_mesh(&ground)?);
        Ok(())
    }

    fn on_release_meshes(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        let meshes = std::mem::take(&mut self.meshes);
        first_failure(
            [meshes.billboard, meshes.ground]
                .into_iter()
                .flatten()
                .map(|handle| gfx.release_mesh(handle)),
        )
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.camera.set_projection(
            self.config.field_of_view_y,
            width as f32 / height as f32,
            self.config.near,
            self.config.far,
        );
        Ok(())
    }

    fn on_key_event(&mut self, key: Key, is_down: bool, _is_alt_down: bool) -> Result<()> {
        if !is_down {
            return Ok(());
        }
        if let Some(action) = Action::from_key(key) {
            log::info!("{}", action.describe());
            action.apply(&mut self.camera, &mut self.show_ground);
        }
        Ok(())
    }

    fn on_update(&mut self) -> Result<()> {
        self.camera.update();
        Ok(())
    }

    fn on_frame(&mut self, gfx: &mut dyn Graphics) -> Result<()> {
        gfx.set_alpha_blending(true);

        let view_projection = self.camera.view_projection();

        let vertex = BillboardVertexBuffer::new(
            view_projection,
            identity_matrix(),
            self.camera.position(),
            LIGHT_POSITION,
        );
        gfx.upload_constant(created(self.buffers.billboard_vertex, "billboard vertex buffer")?, &vertex)?;

        let pixel = BillboardPixelBuffer::new(
            AMBIENT_LIGHT,
            DIFFUSE_LIGHT,
            SPECULAR_COLOR,
            SPECULAR_EXPONENT,
        );
        gfx.upload_constant(created(self.buffers.billboard_pixel, "billboard pixel buffer")?, &pixel)?;

        gfx.draw_mesh(created(self.meshes.billboard, "billboard mesh")?)?;

        if self.show_ground {
            let ground = GroundVertexBuffer::new(view_projection, identity_matrix());
            gfx.upload_constant(created(self.buffers.ground_vertex, "ground vertex buffer")?, &ground)?;
            gfx.draw_mesh(created(self.meshes.ground, "ground mesh")?)?;
        }

        Ok(())
    }
}
