use std::path::PathBuf;

use thiserror::Error;

/// Failure of a host resource operation.
///
/// Every variant means "the call did nothing"; no partially created resource
/// is left behind in the registry.
#[derive(Error, Debug)]
pub enum GfxError {
    #[error("unknown or released {kind} handle {id}")]
    UnknownHandle { kind: &'static str, id: u64 },

    #[error("constant buffer size {0} must be a non-zero multiple of 16 bytes")]
    InvalidBufferSize(usize),

    #[error("upload of {actual} bytes into a {expected}-byte constant buffer")]
    UploadSizeMismatch { expected: usize, actual: usize },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shader {}:\n{message}", path.display())]
    ShaderParse { path: PathBuf, message: String },

    #[error("shader {} failed validation:\n{message}", path.display())]
    ShaderValidation { path: PathBuf, message: String },

    #[error("shader {} has no {stage} entry point `{entry_point}`", path.display())]
    MissingEntryPoint {
        path: PathBuf,
        entry_point: String,
        stage: &'static str,
    },

    #[error("failed to load image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("material declares {count} {what}; at most {max} are supported")]
    TooMany {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("material declares no vertex input elements")]
    NoInputElements,

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("draw_mesh called outside of the frame callback")]
    NoActiveFrame,
}

impl GfxError {
    pub(crate) fn unknown(kind: &'static str, id: u64) -> Self {
        Self::UnknownHandle { kind, id }
    }
}

pub type GfxResult<T> = Result<T, GfxError>;
