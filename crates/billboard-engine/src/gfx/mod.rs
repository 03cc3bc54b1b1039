//! Handle-based resource layer.
//!
//! Applications create constant buffers, shaders, textures, materials and
//! meshes through the [`Graphics`] trait and refer to them by typed handles.
//! The host owns the underlying wgpu objects ([`GpuResources`]).

mod error;
mod graphics;
mod handle;
mod info;
mod resources;
mod shader;
mod texture;

pub use error::{GfxError, GfxResult};
pub use graphics::Graphics;
pub use handle::{
    BufferHandle, MaterialHandle, MeshHandle, PixelShaderHandle, TextureHandle,
    VertexShaderHandle,
};
pub use info::{
    InputElement, InputFormat, MaterialInfo, MeshInfo, MAX_CONSTANT_BUFFERS_PER_STAGE,
    MAX_INPUT_ELEMENTS, MAX_TEXTURES,
};
pub use resources::{FrameTarget, GpuResources};
pub use shader::{load_shader_source, validate_shader_source, ShaderStage};
pub use texture::ImageData;
