//! Error types for pixwarp-core

use thiserror::Error;

/// Errors that can occur in core pixel and geometry operations
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates outside the image
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid geometry parameters
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
