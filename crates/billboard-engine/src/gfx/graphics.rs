use std::path::Path;

use bytemuck::Pod;

use super::error::GfxResult;
use super::handle::{
    BufferHandle, MaterialHandle, MeshHandle, PixelShaderHandle, TextureHandle,
    VertexShaderHandle,
};
use super::info::{MaterialInfo, MeshInfo};

/// Resource and draw capabilities the host offers to application callbacks.
///
/// Every `create_*` has a matching `release_*`; each handle must be released
/// exactly once. Releasing an unknown or already-released handle is an error.
pub trait Graphics {
    fn create_constant_buffer(&mut self, size: usize) -> GfxResult<BufferHandle>;

    /// Replaces the whole content of `buffer`; `data` must match its size.
    fn upload_constant_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> GfxResult<()>;

    fn release_constant_buffer(&mut self, buffer: BufferHandle) -> GfxResult<()>;

    fn create_vertex_shader(&mut self, path: &Path, entry_point: &str)
        -> GfxResult<VertexShaderHandle>;

    fn create_pixel_shader(&mut self, path: &Path, entry_point: &str)
        -> GfxResult<PixelShaderHandle>;

    fn release_vertex_shader(&mut self, shader: VertexShaderHandle) -> GfxResult<()>;

    fn release_pixel_shader(&mut self, shader: PixelShaderHandle) -> GfxResult<()>;

    fn create_texture(&mut self, path: &Path) -> GfxResult<TextureHandle>;

    fn release_texture(&mut self, texture: TextureHandle) -> GfxResult<()>;

    fn create_material(&mut self, info: &MaterialInfo) -> GfxResult<MaterialHandle>;

    fn release_material(&mut self, material: MaterialHandle) -> GfxResult<()>;

    fn create_mesh(&mut self, info: &MeshInfo<'_>) -> GfxResult<MeshHandle>;

    fn release_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()>;

    /// Persistent until changed; selects the blended pipeline of each material.
    fn set_alpha_blending(&mut self, enabled: bool);

    /// Draws `mesh` into the current frame with the constant buffer contents
    /// uploaded so far.
    fn draw_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()>;
}

impl dyn Graphics + '_ {
    /// Creates a constant buffer sized for `T`.
    pub fn create_constant_buffer_for<T: Pod>(&mut self) -> GfxResult<BufferHandle> {
        self.create_constant_buffer(std::mem::size_of::<T>())
    }

    /// Uploads `value` byte for byte.
    pub fn upload_constant<T: Pod>(&mut self, buffer: BufferHandle, value: &T) -> GfxResult<()> {
        self.upload_constant_buffer(buffer, bytemuck::bytes_of(value))
    }
}
