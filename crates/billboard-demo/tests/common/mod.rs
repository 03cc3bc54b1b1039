//! Recording `Graphics` double: validates arguments the way the wgpu host
//! does and keeps a log of every call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use billboard_engine::gfx::{
    BufferHandle, GfxError, GfxResult, Graphics, MaterialHandle, MaterialInfo, MeshHandle,
    MeshInfo, PixelShaderHandle, TextureHandle, VertexShaderHandle,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer { id: u64, size: usize },
    Upload { id: u64, bytes: Vec<u8> },
    CreateVertexShader { id: u64, path: PathBuf, entry: String },
    CreatePixelShader { id: u64, path: PathBuf, entry: String },
    CreateTexture { id: u64, path: PathBuf },
    CreateMaterial { id: u64, textures: Vec<u64>, vertex_buffers: Vec<u64>, pixel_buffers: Vec<u64> },
    CreateMesh { id: u64, material: u64, vertices: usize },
    Release { kind: &'static str, id: u64 },
    AlphaBlending(bool),
    Draw { id: u64 },
}

#[derive(Default)]
pub struct Recorder {
    next_id: u64,
    live: HashMap<u64, &'static str>,
    buffer_sizes: HashMap<u64, usize>,
    material_strides: HashMap<u64, usize>,
    pub calls: Vec<Call>,
    /// `create_texture` fails for paths ending in this file name.
    pub fail_texture: Option<&'static str>,
    /// The next release of this handle kind fails and leaves the handle live.
    pub fail_release: Option<&'static str>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live handles per kind.
    pub fn live(&self, kind: &str) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn live_total(&self) -> usize {
        self.live.len()
    }

    pub fn texture_paths(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::CreateTexture { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn issue(&mut self, kind: &'static str) -> u64 {
        self.next_id += 1;
        self.live.insert(self.next_id, kind);
        self.next_id
    }

    fn check(&self, kind: &'static str, id: u64) -> GfxResult<()> {
        match self.live.get(&id) {
            Some(k) if *k == kind => Ok(()),
            _ => Err(GfxError::UnknownHandle { kind, id }),
        }
    }

    fn release(&mut self, kind: &'static str, id: u64) -> GfxResult<()> {
        self.check(kind, id)?;
        if self.fail_release == Some(kind) {
            self.fail_release = None;
            return Err(GfxError::UnknownHandle { kind, id });
        }
        self.live.remove(&id);
        self.calls.push(Call::Release { kind, id });
        Ok(())
    }
}

impl Graphics for Recorder {
    fn create_constant_buffer(&mut self, size: usize) -> GfxResult<BufferHandle> {
        if size == 0 || size % 16 != 0 {
            return Err(GfxError::InvalidBufferSize(size));
        }
        let id = self.issue(BufferHandle::KIND);
        self.buffer_sizes.insert(id, size);
        self.calls.push(Call::CreateBuffer { id, size });
        Ok(BufferHandle::from_raw(id))
    }

    fn upload_constant_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> GfxResult<()> {
        self.check(BufferHandle::KIND, buffer.raw())?;
        let expected = self.buffer_sizes[&buffer.raw()];
        if data.len() != expected {
            return Err(GfxError::UploadSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        self.calls.push(Call::Upload {
            id: buffer.raw(),
            bytes: data.to_vec(),
        });
        Ok(())
    }

    fn release_constant_buffer(&mut self, buffer: BufferHandle) -> GfxResult<()> {
        self.release(BufferHandle::KIND, buffer.raw())
    }

    fn create_vertex_shader(
        &mut self,
        path: &Path,
        entry_point: &str,
    ) -> GfxResult<VertexShaderHandle> {
        let id = self.issue(VertexShaderHandle::KIND);
        self.calls.push(Call::CreateVertexShader {
            id,
            path: path.to_path_buf(),
            entry: entry_point.to_string(),
        });
        Ok(VertexShaderHandle::from_raw(id))
    }

    fn create_pixel_shader(
        &mut self,
        path: &Path,
        entry_point: &str,
    ) -> GfxResult<PixelShaderHandle> {
        let id = self.issue(PixelShaderHandle::KIND);
        self.calls.push(Call::CreatePixelShader {
            id,
            path: path.to_path_buf(),
            entry: entry_point.to_string(),
        });
        Ok(PixelShaderHandle::from_raw(id))
    }

    fn release_vertex_shader(&mut self, shader: VertexShaderHandle) -> GfxResult<()> {
        self.release(VertexShaderHandle::KIND, shader.raw())
    }

    fn release_pixel_shader(&mut self, shader: PixelShaderHandle) -> GfxResult<()> {
        self.release(PixelShaderHandle::KIND, shader.raw())
    }

    fn create_texture(&mut self, path: &Path) -> GfxResult<TextureHandle> {
        if let Some(name) = self.fail_texture {
            if path.ends_with(name) {
                return Err(GfxError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
        }
        let id = self.issue(TextureHandle::KIND);
        self.calls.push(Call::CreateTexture {
            id,
            path: path.to_path_buf(),
        });
        Ok(TextureHandle::from_raw(id))
    }

    fn release_texture(&mut self, texture: TextureHandle) -> GfxResult<()> {
        self.release(TextureHandle::KIND, texture.raw())
    }

    fn create_material(&mut self, info: &MaterialInfo) -> GfxResult<MaterialHandle> {
        info.validate()?;
        for t in &info.textures {
            self.check(TextureHandle::KIND, t.raw())?;
        }
        for b in info.vertex_constant_buffers.iter().chain(&info.pixel_constant_buffers) {
            self.check(BufferHandle::KIND, b.raw())?;
        }
        self.check(VertexShaderHandle::KIND, info.vertex_shader.raw())?;
        self.check(PixelShaderHandle::KIND, info.pixel_shader.raw())?;

        let id = self.issue(MaterialHandle::KIND);
        self.material_strides.insert(id, info.vertex_stride_floats());
        self.calls.push(Call::CreateMaterial {
            id,
            textures: info.textures.iter().map(|t| t.raw()).collect(),
            vertex_buffers: info.vertex_constant_buffers.iter().map(|b| b.raw()).collect(),
            pixel_buffers: info.pixel_constant_buffers.iter().map(|b| b.raw()).collect(),
        });
        Ok(MaterialHandle::from_raw(id))
    }

    fn release_material(&mut self, material: MaterialHandle) -> GfxResult<()> {
        self.release(MaterialHandle::KIND, material.raw())
    }

    fn create_mesh(&mut self, info: &MeshInfo<'_>) -> GfxResult<MeshHandle> {
        self.check(MaterialHandle::KIND, info.material.raw())?;
        let vertices = info.validate(self.material_strides[&info.material.raw()])?;

        let id = self.issue(MeshHandle::KIND);
        self.calls.push(Call::CreateMesh {
            id,
            material: info.material.raw(),
            vertices,
        });
        Ok(MeshHandle::from_raw(id))
    }

    fn release_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()> {
        self.release(MeshHandle::KIND, mesh.raw())
    }

    fn set_alpha_blending(&mut self, enabled: bool) {
        self.calls.push(Call::AlphaBlending(enabled));
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()> {
        self.check(MeshHandle::KIND, mesh.raw())?;
        self.calls.push(Call::Draw { id: mesh.raw() });
        Ok(())
    }
}
