// THEORY:
// The `error` module gathers every failure the engine can surface into a single enum.
// Only a handful of things can actually go wrong: the pixel storage cannot be obtained,
// a caller reads or writes outside the grid, or the outer I/O collaborators (image files,
// JSON configuration) fail. "No region found" is deliberately absent here; it is a value
// (the inverted sentinel rectangle), not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("could not allocate a {width}x{height} pixel buffer")]
    AllocationFailure { width: u32, height: u32 },
    #[error("pixel buffer dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    IndexOutOfRange {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    #[error("raw buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("image error")]
    Image(#[from] image::ImageError),
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),
    #[error("histogram worker failed")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, VisionError>;
