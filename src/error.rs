//! Error types for the rendering pipeline.
//!
//! Every failure is reported synchronously, before any output is produced.
//! Nothing is clamped or silently repaired: a zero-sized target is an error,
//! not a 1×1 image.

use std::io;

use thiserror::Error;

/// Errors produced while building a renderer or rendering a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A width or height of zero was requested.
    #[error("invalid dimension {width}x{height}: width and height must be at least 1")]
    InvalidDimension { width: usize, height: usize },

    /// The pixel data does not hold exactly `width * height` pixels.
    #[error("malformed pixel buffer: expected {expected} pixels, got {actual}")]
    MalformedBuffer { expected: usize, actual: usize },

    /// Writing escape sequences into the output buffer failed.
    #[error("failed to format escape sequence")]
    Format(#[from] std::fmt::Error),

    /// Writing a finished frame to a sink failed.
    #[error("failed to write frame: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced while loading a [`RendererConfig`](crate::config::RendererConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] RenderError),
}

/// Result alias used throughout the rendering pipeline.
pub type Result<T> = std::result::Result<T, RenderError>;
