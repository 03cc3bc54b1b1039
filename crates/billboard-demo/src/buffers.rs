//! Constant buffer layouts.
//!
//! Each struct is byte-identical to the uniform struct of the same name in
//! the WGSL sources under `data/shader`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Vertex-stage constants of the billboard material.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct BillboardVertexBuffer {
    pub view_projection: [f32; 16],
    pub world: [f32; 16],
    pub camera_position: [f32; 3],
    pub _pad0: f32,
    pub light_position: [f32; 3],
    pub _pad1: f32,
}

impl BillboardVertexBuffer {
    pub fn new(view_projection: Mat4, world: Mat4, camera_position: Vec3, light_position: Vec3) -> Self {
        Self {
            view_projection: view_projection.to_cols_array(),
            world: world.to_cols_array(),
            camera_position: camera_position.to_array(),
            _pad0: 0.0,
            light_position: light_position.to_array(),
            _pad1: 0.0,
        }
    }
}

/// Pixel-stage lighting constants of the billboard material.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct BillboardPixelBuffer {
    pub ambient_light_color: [f32; 4],
    pub diffuse_light_color: [f32; 4],
    pub specular_color: [f32; 4],
    pub specular_exponent: f32,
    pub _pad: [f32; 3],
}

impl BillboardPixelBuffer {
    pub fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, specular_exponent: f32) -> Self {
        Self {
            ambient_light_color: ambient.to_array(),
            diffuse_light_color: diffuse.to_array(),
            specular_color: specular.to_array(),
            specular_exponent,
            _pad: [0.0; 3],
        }
    }
}

/// Vertex-stage constants of the ground material.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GroundVertexBuffer {
    pub view_projection: [f32; 16],
    pub world: [f32; 16],
}

impl GroundVertexBuffer {
    pub fn new(view_projection: Mat4, world: Mat4) -> Self {
        Self {
            view_projection: view_projection.to_cols_array(),
            world: world.to_cols_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem::{offset_of, size_of};

    use super::*;

    #[test]
    fn billboard_vertex_layout() {
        assert_eq!(size_of::<BillboardVertexBuffer>(), 160);
        assert_eq!(offset_of!(BillboardVertexBuffer, world), 64);
        assert_eq!(offset_of!(BillboardVertexBuffer, camera_position), 128);
        assert_eq!(offset_of!(BillboardVertexBuffer, light_position), 144);
    }

    #[test]
    fn billboard_pixel_layout() {
        assert_eq!(size_of::<BillboardPixelBuffer>(), 64);
        assert_eq!(offset_of!(BillboardPixelBuffer, diffuse_light_color), 16);
        assert_eq!(offset_of!(BillboardPixelBuffer, specular_color), 32);
        assert_eq!(offset_of!(BillboardPixelBuffer, specular_exponent), 48);
    }

    #[test]
    fn ground_vertex_layout() {
        assert_eq!(size_of::<GroundVertexBuffer>(), 128);
        assert_eq!(offset_of!(GroundVertexBuffer, world), 64);
    }

    #[test]
    fn matrices_are_stored_column_major() {
        let vp = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let b = GroundVertexBuffer::new(vp, Mat4::IDENTITY);
        assert_eq!(&b.view_projection[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(b.world, Mat4::IDENTITY.to_cols_array());
    }

    #[test]
    fn light_lands_after_camera() {
        let b = BillboardVertexBuffer::new(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Vec3::new(0.0, 1.0, -4.0),
            Vec3::new(5.0, 5.0, -20.0),
        );
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&b));
        assert_eq!(&floats[32..35], &[0.0, 1.0, -4.0]);
        assert_eq!(&floats[36..39], &[5.0, 5.0, -20.0]);
    }
}
