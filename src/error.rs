// error.rs - Failure modes of surface setup
//
// The simulation itself is pure computation and cannot fail once built;
// everything here happens at construction or at the host boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RippleError {
    #[error("failed to load image: {path}")]
    Load { path: String },

    #[error("surface must be non-empty, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("texture buffer length mismatch: expected {expected} bytes, got {got}")]
    BufferSize { expected: usize, got: usize },

    #[error("surface error: {0}")]
    Surface(String),
}
