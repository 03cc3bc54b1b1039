//! The shipped data directory is usable by the wgpu host.

use billboard_demo::app::{
    BILLBOARD_SHADER, GROUND_SHADER, GROUND_TEXTURE, PIXEL_ENTRY, TREE_TEXTURES, VERTEX_ENTRY,
    WALL_TEXTURES,
};
use billboard_demo::DemoConfig;
use billboard_engine::gfx::{load_shader_source, ImageData, ShaderStage};

#[test]
fn shaders_parse_and_expose_entry_points() {
    let config = DemoConfig::default();

    for file in [BILLBOARD_SHADER, GROUND_SHADER] {
        let path = config.shader_path(file);
        load_shader_source(&path, VERTEX_ENTRY, ShaderStage::Vertex)
            .unwrap_or_else(|e| panic!("{e}"));
        load_shader_source(&path, PIXEL_ENTRY, ShaderStage::Pixel)
            .unwrap_or_else(|e| panic!("{e}"));
    }
}

#[test]
fn pixel_entry_is_not_a_vertex_entry() {
    let path = DemoConfig::default().shader_path(BILLBOARD_SHADER);
    assert!(load_shader_source(&path, PIXEL_ENTRY, ShaderStage::Vertex).is_err());
}

#[test]
fn images_decode_to_rgba() {
    let config = DemoConfig::default();
    let files = [
        TREE_TEXTURES.0,
        TREE_TEXTURES.1,
        WALL_TEXTURES.0,
        WALL_TEXTURES.1,
        GROUND_TEXTURE,
    ];

    for file in files {
        let image = ImageData::load(&config.image_path(file)).unwrap_or_else(|e| panic!("{e:#?}"));
        assert_eq!((image.width, image.height), (256, 256), "{file}");
        assert_eq!(image.rgba.len(), 256 * 256 * 4, "{file}");
    }
}
