#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod rendering;
pub mod util;

pub use crate::config::{PartialConfig, RendererConfig};
pub use crate::error::{ConfigError, RenderError, Result};
pub use crate::rendering::color::{ColorMode, StyledColor};
pub use crate::rendering::grid::PixelBuffer;
pub use crate::rendering::renderer::{ImageRenderer, RenderedImage, render};
