//! Renderer configuration.
//!
//! A [`RendererConfig`] is a plain value passed to
//! [`ImageRenderer::new`](crate::rendering::renderer::ImageRenderer::new),
//! which validates it up front. It can also be loaded from TOML:
//!
//! ```toml
//! # indexed (16 colors) or truecolor (24-bit)
//! color_mode = "truecolor"
//!
//! # target grid in pixels; one text row shows two pixel rows
//! width = 120
//! height = 80
//!
//! # indexed mode: accept the first palette color closer than this, <= 0 for exact matching
//! threshold = 5
//!
//! # truecolor mode: skip codes within this distance of the previous one, 0 for exact
//! bias = 0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::rendering::color::ColorMode;
use crate::rendering::grid::check_dimensions;
use crate::rendering::matcher::MatchStrategy;

/// Default early-accept threshold for indexed matching.
pub const DEFAULT_THRESHOLD: i32 = 5;

/// Settings for one renderer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub color_mode: ColorMode,
    /// Target width in pixels (= terminal columns).
    pub width: usize,
    /// Target height in pixels (= twice the terminal rows).
    pub height: usize,
    /// Early-accept distance for indexed matching; `<= 0` is exact nearest search.
    pub threshold: i32,
    /// Elision tolerance for true-color codes; `0` is exact comparison.
    pub bias: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Indexed,
            width: 80,
            height: 48,
            threshold: DEFAULT_THRESHOLD,
            bias: 0,
        }
    }
}

impl RendererConfig {
    /// A default configuration for the given mode and target size.
    pub fn new(color_mode: ColorMode, width: usize, height: usize) -> Self {
        Self {
            color_mode,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_threshold(self, threshold: i32) -> Self {
        Self { threshold, ..self }
    }

    pub fn with_bias(self, bias: u32) -> Self {
        Self { bias, ..self }
    }

    /// The matching strategy implied by `threshold`.
    pub fn match_strategy(&self) -> MatchStrategy {
        MatchStrategy::from_threshold(self.threshold)
    }

    /// Checks that the target size is at least 1×1.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)
    }

    /// Parses and validates a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(PartialConfig::from_toml_str(s)?.resolve()?)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Renderer settings where every key is optional.
///
/// This is what a config file or a command line actually specifies. Layers are
/// combined with [`or`](PartialConfig::or) and turned into a full
/// [`RendererConfig`] with [`resolve`](PartialConfig::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub color_mode: Option<ColorMode>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub threshold: Option<i32>,
    pub bias: Option<u32>,
}

impl PartialConfig {
    /// Parses a TOML configuration without filling in defaults.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML configuration file without filling in defaults.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Keeps the keys set in `self` and takes the rest from `fallback`.
    pub fn or(self, fallback: PartialConfig) -> Self {
        Self {
            color_mode: self.color_mode.or(fallback.color_mode),
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            threshold: self.threshold.or(fallback.threshold),
            bias: self.bias.or(fallback.bias),
        }
    }

    /// Fills unset keys with their defaults and validates the result.
    pub fn resolve(self) -> Result<RendererConfig> {
        let defaults = RendererConfig::default();
        let config = RendererConfig {
            color_mode: self.color_mode.unwrap_or(defaults.color_mode),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            threshold: self.threshold.unwrap_or(defaults.threshold),
            bias: self.bias.unwrap_or(defaults.bias),
        };
        config.validate()?;
        Ok(config)
    }
}
