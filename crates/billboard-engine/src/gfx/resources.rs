use std::collections::HashMap;
use std::num::NonZeroU64;
use std::path::Path;

use wgpu::util::DeviceExt;

use super::error::{GfxError, GfxResult};
use super::graphics::Graphics;
use super::handle::{
    BufferHandle, MaterialHandle, MeshHandle, PixelShaderHandle, TextureHandle,
    VertexShaderHandle,
};
use super::info::{MaterialInfo, MeshInfo};
use super::shader::{load_shader_source, ShaderStage};
use super::texture::ImageData;

/// Color + depth views of the frame being rendered.
#[derive(Debug, Clone)]
pub struct FrameTarget {
    pub color: wgpu::TextureView,
    pub depth: wgpu::TextureView,
}

struct ConstantBuffer {
    buffer: wgpu::Buffer,
    size: usize,
}

struct ShaderModule {
    module: wgpu::ShaderModule,
    entry_point: String,
}

struct Texture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct Material {
    opaque: wgpu::RenderPipeline,
    blended: wgpu::RenderPipeline,
    bind_groups: [wgpu::BindGroup; 3],
    stride_floats: usize,
}

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material: MaterialHandle,
}

/// wgpu-backed registry of every resource an application created.
///
/// Resources live in per-kind maps keyed by handle id. Ids are never reused,
/// so a stale handle always fails instead of aliasing a newer resource.
pub struct GpuResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    sampler: wgpu::Sampler,

    next_id: u64,
    buffers: HashMap<u64, ConstantBuffer>,
    vertex_shaders: HashMap<u64, ShaderModule>,
    pixel_shaders: HashMap<u64, ShaderModule>,
    textures: HashMap<u64, Texture>,
    materials: HashMap<u64, Material>,
    meshes: HashMap<u64, Mesh>,

    alpha_blending: bool,
    frame: Option<FrameTarget>,
}

impl GpuResources {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("billboard material sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            device,
            queue,
            color_format,
            depth_format,
            sampler,
            next_id: 1,
            buffers: HashMap::new(),
            vertex_shaders: HashMap::new(),
            pixel_shaders: HashMap::new(),
            textures: HashMap::new(),
            materials: HashMap::new(),
            meshes: HashMap::new(),
            alpha_blending: false,
            frame: None,
        }
    }

    /// Makes `target` the destination of `draw_mesh` until [`end_frame`].
    ///
    /// [`end_frame`]: GpuResources::end_frame
    pub fn begin_frame(&mut self, target: FrameTarget) {
        self.frame = Some(target);
    }

    pub fn end_frame(&mut self) {
        self.frame = None;
    }

    /// Number of resources still registered, per kind. Non-zero counts at
    /// shutdown are leaks.
    pub fn live_counts(&self) -> [(&'static str, usize); 6] {
        [
            (BufferHandle::KIND, self.buffers.len()),
            (VertexShaderHandle::KIND, self.vertex_shaders.len()),
            (PixelShaderHandle::KIND, self.pixel_shaders.len()),
            (TextureHandle::KIND, self.textures.len()),
            (MaterialHandle::KIND, self.materials.len()),
            (MeshHandle::KIND, self.meshes.len()),
        ]
    }

    /// Logs every resource that was never released.
    pub fn report_leaks(&self) {
        for (kind, count) in self.live_counts() {
            if count > 0 {
                log::warn!("{count} {kind} resource(s) were not released");
            }
        }
    }

    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn create_shader(
        &mut self,
        path: &Path,
        entry_point: &str,
        stage: ShaderStage,
    ) -> GfxResult<(u64, ShaderModule)> {
        let source = load_shader_source(path, entry_point, stage)?;
        let label = format!("{} ({entry_point})", path.display());

        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        log::debug!("created {stage} shader {label}");

        Ok((
            self.issue_id(),
            ShaderModule {
                module,
                entry_point: entry_point.to_string(),
            },
        ))
    }

    fn uniform_group(
        &self,
        label: &str,
        buffers: &[BufferHandle],
        visibility: wgpu::ShaderStages,
    ) -> GfxResult<(wgpu::BindGroupLayout, wgpu::BindGroup)> {
        let mut layout_entries = Vec::with_capacity(buffers.len());
        let mut resources = Vec::with_capacity(buffers.len());

        for (slot, handle) in buffers.iter().enumerate() {
            let cb = self
                .buffers
                .get(&handle.raw())
                .ok_or_else(|| GfxError::unknown(BufferHandle::KIND, handle.raw()))?;

            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: slot as u32,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(cb.size as u64),
                },
                count: None,
            });
            resources.push(&cb.buffer);
        }

        let layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &layout_entries,
            });

        let entries: Vec<wgpu::BindGroupEntry<'_>> = resources
            .iter()
            .enumerate()
            .map(|(slot, buffer)| wgpu::BindGroupEntry {
                binding: slot as u32,
                resource: buffer.as_entire_binding(),
            })
            .collect();

        let group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &entries,
        });

        Ok((layout, group))
    }

    fn texture_group(
        &self,
        textures: &[TextureHandle],
    ) -> GfxResult<(wgpu::BindGroupLayout, wgpu::BindGroup)> {
        let mut layout_entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        }];
        let mut views = Vec::with_capacity(textures.len());

        for (slot, handle) in textures.iter().enumerate() {
            let tex = self
                .textures
                .get(&handle.raw())
                .ok_or_else(|| GfxError::unknown(TextureHandle::KIND, handle.raw()))?;

            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: 1 + slot as u32,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            views.push(&tex.view);
        }

        let layout = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("billboard material textures"),
                entries: &layout_entries,
            });

        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        }];
        entries.extend(views.iter().enumerate().map(|(slot, view)| wgpu::BindGroupEntry {
            binding: 1 + slot as u32,
            resource: wgpu::BindingResource::TextureView(*view),
        }));

        let group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("billboard material textures"),
            layout: &layout,
            entries: &entries,
        });

        Ok((layout, group))
    }

    fn build_pipeline(
        &self,
        label: &str,
        layout: &wgpu::PipelineLayout,
        vs: &ShaderModule,
        ps: &ShaderModule,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        blend: Option<wgpu::BlendState>,
    ) -> wgpu::RenderPipeline {
        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),

                vertex: wgpu::VertexState {
                    module: &vs.module,
                    entry_point: Some(vs.entry_point.as_str()),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &ps.module,
                    entry_point: Some(ps.entry_point.as_str()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.color_format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: self.depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
    }
}

impl Graphics for GpuResources {
    fn create_constant_buffer(&mut self, size: usize) -> GfxResult<BufferHandle> {
        if size == 0 || size % 16 != 0 {
            return Err(GfxError::InvalidBufferSize(size));
        }

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("billboard constant buffer"),
            size: size as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let id = self.issue_id();
        self.buffers.insert(id, ConstantBuffer { buffer, size });
        log::debug!("created constant buffer #{id} ({size} bytes)");
        Ok(BufferHandle::from_raw(id))
    }

    fn upload_constant_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> GfxResult<()> {
        let cb = self
            .buffers
            .get(&buffer.raw())
            .ok_or_else(|| GfxError::unknown(BufferHandle::KIND, buffer.raw()))?;

        if data.len() != cb.size {
            return Err(GfxError::UploadSizeMismatch {
                expected: cb.size,
                actual: data.len(),
            });
        }

        self.queue.write_buffer(&cb.buffer, 0, data);
        Ok(())
    }

    fn release_constant_buffer(&mut self, buffer: BufferHandle) -> GfxResult<()> {
        self.buffers
            .remove(&buffer.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(BufferHandle::KIND, buffer.raw()))
    }

    fn create_vertex_shader(
        &mut self,
        path: &Path,
        entry_point: &str,
    ) -> GfxResult<VertexShaderHandle> {
        let (id, module) = self.create_shader(path, entry_point, ShaderStage::Vertex)?;
        self.vertex_shaders.insert(id, module);
        Ok(VertexShaderHandle::from_raw(id))
    }

    fn create_pixel_shader(
        &mut self,
        path: &Path,
        entry_point: &str,
    ) -> GfxResult<PixelShaderHandle> {
        let (id, module) = self.create_shader(path, entry_point, ShaderStage::Pixel)?;
        self.pixel_shaders.insert(id, module);
        Ok(PixelShaderHandle::from_raw(id))
    }

    fn release_vertex_shader(&mut self, shader: VertexShaderHandle) -> GfxResult<()> {
        self.vertex_shaders
            .remove(&shader.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(VertexShaderHandle::KIND, shader.raw()))
    }

    fn release_pixel_shader(&mut self, shader: PixelShaderHandle) -> GfxResult<()> {
        self.pixel_shaders
            .remove(&shader.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(PixelShaderHandle::KIND, shader.raw()))
    }

    fn create_texture(&mut self, path: &Path) -> GfxResult<TextureHandle> {
        let image = ImageData::load(path)?;
        let label = path.display().to_string();
        let texture = image.upload(&self.device, &self.queue, &label);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let id = self.issue_id();
        self.textures.insert(
            id,
            Texture {
                _texture: texture,
                view,
            },
        );
        log::debug!("created texture #{id} from {label} ({}x{})", image.width, image.height);
        Ok(TextureHandle::from_raw(id))
    }

    fn release_texture(&mut self, texture: TextureHandle) -> GfxResult<()> {
        self.textures
            .remove(&texture.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(TextureHandle::KIND, texture.raw()))
    }

    fn create_material(&mut self, info: &MaterialInfo) -> GfxResult<MaterialHandle> {
        info.validate()?;

        let vs = self
            .vertex_shaders
            .get(&info.vertex_shader.raw())
            .ok_or_else(|| GfxError::unknown(VertexShaderHandle::KIND, info.vertex_shader.raw()))?;
        let ps = self
            .pixel_shaders
            .get(&info.pixel_shader.raw())
            .ok_or_else(|| GfxError::unknown(PixelShaderHandle::KIND, info.pixel_shader.raw()))?;

        let (vs_layout, vs_group) = self.uniform_group(
            "billboard vertex constants",
            &info.vertex_constant_buffers,
            wgpu::ShaderStages::VERTEX,
        )?;
        let (ps_layout, ps_group) = self.uniform_group(
            "billboard pixel constants",
            &info.pixel_constant_buffers,
            wgpu::ShaderStages::FRAGMENT,
        )?;
        let (tex_layout, tex_group) = self.texture_group(&info.textures)?;

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("billboard material layout"),
                bind_group_layouts: &[&vs_layout, &ps_layout, &tex_layout],
                immediate_size: 0,
            });

        let mut attributes = Vec::with_capacity(info.input_elements.len());
        let mut offset = 0u64;
        for (location, element) in info.input_elements.iter().enumerate() {
            attributes.push(wgpu::VertexAttribute {
                format: element.format.vertex_format(),
                offset,
                shader_location: location as u32,
            });
            offset += (element.format.float_count() * std::mem::size_of::<f32>()) as u64;
        }

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: offset,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };

        let opaque = self.build_pipeline(
            "billboard material (opaque)",
            &pipeline_layout,
            vs,
            ps,
            vertex_layout.clone(),
            None,
        );
        let blended = self.build_pipeline(
            "billboard material (alpha)",
            &pipeline_layout,
            vs,
            ps,
            vertex_layout,
            Some(wgpu::BlendState::ALPHA_BLENDING),
        );

        let id = self.issue_id();
        self.materials.insert(
            id,
            Material {
                opaque,
                blended,
                bind_groups: [vs_group, ps_group, tex_group],
                stride_floats: info.vertex_stride_floats(),
            },
        );
        log::debug!(
            "created material #{id} ({} inputs, {} textures)",
            info.input_elements.len(),
            info.textures.len()
        );
        Ok(MaterialHandle::from_raw(id))
    }

    fn release_material(&mut self, material: MaterialHandle) -> GfxResult<()> {
        self.materials
            .remove(&material.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(MaterialHandle::KIND, material.raw()))
    }

    fn create_mesh(&mut self, info: &MeshInfo<'_>) -> GfxResult<MeshHandle> {
        let material = self
            .materials
            .get(&info.material.raw())
            .ok_or_else(|| GfxError::unknown(MaterialHandle::KIND, info.material.raw()))?;

        let vertex_count = info.validate(material.stride_floats)?;

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("billboard mesh vbo"),
                contents: bytemuck::cast_slice(info.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("billboard mesh ibo"),
                contents: bytemuck::cast_slice(info.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let id = self.issue_id();
        self.meshes.insert(
            id,
            Mesh {
                vertex_buffer,
                index_buffer,
                index_count: info.indices.len() as u32,
                material: info.material,
            },
        );
        log::debug!(
            "created mesh #{id} ({vertex_count} vertices, {} triangles)",
            info.indices.len() / 3
        );
        Ok(MeshHandle::from_raw(id))
    }

    fn release_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()> {
        self.meshes
            .remove(&mesh.raw())
            .map(drop)
            .ok_or_else(|| GfxError::unknown(MeshHandle::KIND, mesh.raw()))
    }

    fn set_alpha_blending(&mut self, enabled: bool) {
        self.alpha_blending = enabled;
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) -> GfxResult<()> {
        let frame = self.frame.as_ref().ok_or(GfxError::NoActiveFrame)?;
        let mesh = self
            .meshes
            .get(&mesh.raw())
            .ok_or_else(|| GfxError::unknown(MeshHandle::KIND, mesh.raw()))?;
        let material = self
            .materials
            .get(&mesh.material.raw())
            .ok_or_else(|| GfxError::unknown(MaterialHandle::KIND, mesh.material.raw()))?;

        let pipeline = if self.alpha_blending {
            &material.blended
        } else {
            &material.opaque
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("billboard draw encoder"),
            });

        // Scope so the pass releases the encoder before finish().
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("billboard draw pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &frame.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            for (index, group) in material.bind_groups.iter().enumerate() {
                rpass.set_bind_group(index as u32, group, &[]);
            }
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        // Submitting per draw keeps upload -> draw ordering identical to an
        // immediate-mode context.
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
