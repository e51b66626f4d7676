use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoaderError {
    // Manifest and setup errors
    #[error("Manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Manifest line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Manifest has no entries")]
    EmptyManifest,

    // Per-item errors during batch fill
    #[error("Failed to decode {}: {source}", path.display())]
    DecodeError {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Image {} is {got_height}x{got_width}, batch expects {height}x{width}", path.display())]
    ShapeMismatch {
        path: PathBuf,
        height: usize,
        width: usize,
        got_height: usize,
        got_width: usize,
    },

    // Config validation errors
    #[error("batch_size must be greater than zero")]
    InvalidBatchSize,

    #[error("dim_label must be at least 1")]
    InvalidLabelDim,

    #[error("new_height and new_width must be set together")]
    PartialResizeTarget,
}
