use std::fmt;
use std::path::Path;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::error::{GfxError, GfxResult};

/// Pipeline stage a shader handle is created for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Pixel => naga::ShaderStage::Fragment,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Pixel => "pixel",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads a WGSL file and checks that it parses, validates and exports
/// `entry_point` for `stage`. Returns the source on success.
pub fn load_shader_source(path: &Path, entry_point: &str, stage: ShaderStage) -> GfxResult<String> {
    let source = std::fs::read_to_string(path).map_err(|source| GfxError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    validate_shader_source(path, &source, entry_point, stage)?;
    Ok(source)
}

/// Same as [`load_shader_source`] for an in-memory source; `path` only labels
/// diagnostics.
pub fn validate_shader_source(
    path: &Path,
    source: &str,
    entry_point: &str,
    stage: ShaderStage,
) -> GfxResult<()> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| GfxError::ShaderParse {
        path: path.to_path_buf(),
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| GfxError::ShaderValidation {
            path: path.to_path_buf(),
            message: e.emit_to_string(source),
        })?;

    let exported = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == stage.naga());

    if !exported {
        return Err(GfxError::MissingEntryPoint {
            path: path.to_path_buf(),
            entry_point: entry_point.to_string(),
            stage: stage.name(),
        });
    }
    Ok(())
}
