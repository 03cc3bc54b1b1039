//! Static geometry and vertex layouts.

use billboard_engine::gfx::{InputElement, InputFormat};

/// position, tangent, binormal, normal, texcoord
pub const BILLBOARD_INPUTS: [InputElement; 5] = [
    InputElement::new("POSITION", InputFormat::Float3),
    InputElement::new("TANGENT", InputFormat::Float3),
    InputElement::new("BINORMAL", InputFormat::Float3),
    InputElement::new("NORMAL", InputFormat::Float3),
    InputElement::new("TEXCOORD", InputFormat::Float2),
];

pub const GROUND_INPUTS: [InputElement; 2] = [
    InputElement::new("POSITION", InputFormat::Float3),
    InputElement::new("TEXCOORD", InputFormat::Float2),
];

/// 2x2 quad in the XY plane facing -Z.
#[rustfmt::skip]
pub const BILLBOARD_VERTICES: [f32; 4 * 14] = [
    -1.0, -1.0, 0.0,   1.0, 0.0, 0.0,   0.0, 1.0, 0.0,   0.0, 0.0, -1.0,   0.0, 1.0,
     1.0, -1.0, 0.0,   1.0, 0.0, 0.0,   0.0, 1.0, 0.0,   0.0, 0.0, -1.0,   1.0, 1.0,
     1.0,  1.0, 0.0,   1.0, 0.0, 0.0,   0.0, 1.0, 0.0,   0.0, 0.0, -1.0,   1.0, 0.0,
    -1.0,  1.0, 0.0,   1.0, 0.0, 0.0,   0.0, 1.0, 0.0,   0.0, 0.0, -1.0,   0.0, 0.0,
];

/// 8x8 quad at y = -1, just below the billboard.
#[rustfmt::skip]
pub const GROUND_VERTICES: [f32; 4 * 5] = [
    -4.0, -1.0, -4.0,   0.0, 1.0,
     4.0, -1.0, -4.0,   1.0, 1.0,
     4.0, -1.0,  4.0,   1.0, 0.0,
    -4.0, -1.0,  4.0,   0.0, 0.0,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    fn stride(inputs: &[InputElement]) -> usize {
        inputs.iter().map(|e| e.format.float_count()).sum()
    }

    #[test]
    fn vertex_data_matches_layouts() {
        assert_eq!(stride(&BILLBOARD_INPUTS), 14);
        assert_eq!(BILLBOARD_VERTICES.len() % 14, 0);
        assert_eq!(stride(&GROUND_INPUTS), 5);
        assert_eq!(GROUND_VERTICES.len() % 5, 0);
    }

    #[test]
    fn indices_stay_in_range() {
        assert!(QUAD_INDICES.iter().all(|&i| i < 4));
    }

    #[test]
    fn ground_is_flat_below_origin() {
        assert!(GROUND_VERTICES.chunks(5).all(|v| v[1] == -1.0));
    }
}
