//! Creation descriptors passed by applications.

use super::error::{GfxError, GfxResult};
use super::handle::{BufferHandle, MaterialHandle, PixelShaderHandle, TextureHandle, VertexShaderHandle};

pub const MAX_TEXTURES: usize = 16;
pub const MAX_CONSTANT_BUFFERS_PER_STAGE: usize = 12;
pub const MAX_INPUT_ELEMENTS: usize = 16;

/// Component layout of one vertex input element.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputFormat {
    Float,
    Float2,
    Float3,
    Float4,
}

impl InputFormat {
    /// Number of `f32` components.
    pub fn float_count(self) -> usize {
        match self {
            InputFormat::Float => 1,
            InputFormat::Float2 => 2,
            InputFormat::Float3 => 3,
            InputFormat::Float4 => 4,
        }
    }

    pub(crate) fn vertex_format(self) -> wgpu::VertexFormat {
        match self {
            InputFormat::Float => wgpu::VertexFormat::Float32,
            InputFormat::Float2 => wgpu::VertexFormat::Float32x2,
            InputFormat::Float3 => wgpu::VertexFormat::Float32x3,
            InputFormat::Float4 => wgpu::VertexFormat::Float32x4,
        }
    }
}

/// One interleaved vertex attribute.
///
/// `name` is the semantic (e.g. "POSITION"); it only labels the attribute.
/// Attributes bind to `@location(i)` in declaration order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InputElement {
    pub name: &'static str,
    pub format: InputFormat,
}

impl InputElement {
    pub const fn new(name: &'static str, format: InputFormat) -> Self {
        Self { name, format }
    }
}

/// Everything needed to draw a mesh: shaders, resource bindings and the
/// vertex input layout.
///
/// Binding convention seen by WGSL:
/// - `@group(0) @binding(i)`: `vertex_constant_buffers[i]`
/// - `@group(1) @binding(i)`: `pixel_constant_buffers[i]`
/// - `@group(2) @binding(0)`: linear/repeat sampler
/// - `@group(2) @binding(1 + i)`: `textures[i]`
#[derive(Debug, Clone)]
pub struct MaterialInfo {
    pub textures: Vec<TextureHandle>,
    pub vertex_constant_buffers: Vec<BufferHandle>,
    pub pixel_constant_buffers: Vec<BufferHandle>,
    pub vertex_shader: VertexShaderHandle,
    pub pixel_shader: PixelShaderHandle,
    pub input_elements: Vec<InputElement>,
}

impl MaterialInfo {
    /// Interleaved vertex size in floats.
    pub fn vertex_stride_floats(&self) -> usize {
        self.input_elements.iter().map(|e| e.format.float_count()).sum()
    }

    /// Checks the fixed-size limits of the host.
    pub fn validate(&self) -> GfxResult<()> {
        check_max("textures", self.textures.len(), MAX_TEXTURES)?;
        check_max(
            "vertex constant buffers",
            self.vertex_constant_buffers.len(),
            MAX_CONSTANT_BUFFERS_PER_STAGE,
        )?;
        check_max(
            "pixel constant buffers",
            self.pixel_constant_buffers.len(),
            MAX_CONSTANT_BUFFERS_PER_STAGE,
        )?;
        check_max("input elements", self.input_elements.len(), MAX_INPUT_ELEMENTS)?;
        if self.input_elements.is_empty() {
            return Err(GfxError::NoInputElements);
        }
        Ok(())
    }
}

fn check_max(what: &'static str, count: usize, max: usize) -> GfxResult<()> {
    if count > max {
        return Err(GfxError::TooMany { what, count, max });
    }
    Ok(())
}

/// Interleaved vertex data + triangle list covered by a material.
#[derive(Debug, Copy, Clone)]
pub struct MeshInfo<'a> {
    pub vertices: &'a [f32],
    pub indices: &'a [u32],
    pub material: MaterialHandle,
}

impl MeshInfo<'_> {
    /// Validates the mesh against the interleaved stride of its material and
    /// returns the vertex count.
    pub fn validate(&self, stride_floats: usize) -> GfxResult<usize> {
        if stride_floats == 0 || self.vertices.is_empty() {
            return Err(GfxError::InvalidMesh("mesh has no vertices".into()));
        }
        if self.vertices.len() % stride_floats != 0 {
            return Err(GfxError::InvalidMesh(format!(
                "{} floats is not a whole number of {stride_floats}-float vertices",
                self.vertices.len()
            )));
        }
        if self.indices.is_empty() || self.indices.len() % 3 != 0 {
            return Err(GfxError::InvalidMesh(format!(
                "index count {} is not a non-zero multiple of 3",
                self.indices.len()
            )));
        }

        let vertex_count = self.vertices.len() / stride_floats;
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GfxError::InvalidMesh(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }
        Ok(vertex_count)
    }
}
