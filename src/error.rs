use thiserror::Error;

/// Errors raised by a render target while capturing or restoring snapshots
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to encode surface snapshot: {0}")]
    Encode(#[source] image::ImageError),
    #[error("failed to decode surface snapshot: {0}")]
    Decode(#[source] image::ImageError),
    /// The decoded snapshot does not cover the surface exactly
    #[error("snapshot is {found:?} pixels but the surface is {expected:?}")]
    SizeMismatch { expected: [u32; 2], found: [u32; 2] },
    /// The decode was dropped before it produced pixels
    #[error("snapshot decode was abandoned before completing")]
    DecodeAbandoned,
}

/// Errors raised while loading a [`crate::CanvasConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid canvas configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Errors raised while saving the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("browser download failed: {0}")]
    Web(String),
}
