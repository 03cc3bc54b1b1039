//! Matrix helpers.
//!
//! Conventions: left-handed world, clip depth in `[0, 1]`, column-major
//! storage (`Mat4::to_cols_array` uploads straight into WGSL `mat4x4<f32>`).

use glam::{Mat4, Vec3};

#[inline]
pub fn identity_matrix() -> Mat4 {
    Mat4::IDENTITY
}

/// Left-handed look-at view matrix.
#[inline]
pub fn view_matrix(eye: Vec3, at: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_lh(eye, at, up)
}

/// Left-handed perspective projection. `fov_y_degrees` is the full vertical
/// view angle.
#[inline]
pub fn projection_matrix(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_lh(fov_y_degrees.to_radians(), aspect, near, far)
}

/// Concatenates two transforms: the result applies `first`, then `then`.
///
/// This is the row-vector product `first × then`; e.g. `mul_matrix(view,
/// projection)` is the view-projection matrix.
#[inline]
pub fn mul_matrix(first: Mat4, then: Mat4) -> Mat4 {
    then * first
}
