//! Error types
//!
//! The simulation itself has no error paths. Errors only come from building a
//! world out of bad configuration or from a collaborator failing at startup.

use crate::sim::Rect;

/// Configuration errors, rejected when a world or settings are built
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Play field must have positive, finite extents
    #[error("play field {width}x{height} is not positive")]
    Playfield { width: f32, height: f32 },

    /// A rectangle with negative or non-finite extents
    #[error("{what} has a malformed rectangle {rect:?}")]
    MalformedRect { what: String, rect: Rect },

    /// A speed, velocity or acceleration that is NaN or infinite
    #[error("{what} must be finite")]
    NonFinite { what: String },

    /// A paddle or scroll speed below zero
    #[error("{what} must not be negative")]
    Negative { what: String },

    /// Every variant needs something to play with
    #[error("roster '{0}' contains no ball")]
    NoBall(String),

    /// Pipe gap offsets are drawn from an inclusive range
    #[error("gap offset range {min}..={max} is empty")]
    EmptyGapRange { min: i32, max: i32 },

    /// Spawn rules need a non-zero low-water mark
    #[error("spawn rule '{0}' has a zero low-water mark")]
    ZeroLowWater(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Collaborator failures (fatal at startup)
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

/// Anything that can stop a session from starting
#[derive(thiserror::Error, Debug)]
pub enum ArcadeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
