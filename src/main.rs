//! Prints an image to the terminal using colored half blocks.
//!
//! cargo run -- path/to/image.png --mode truecolor

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use blockpix::util::escape;
use blockpix::{ColorMode, ImageRenderer, PartialConfig, PixelBuffer, RenderError, RendererConfig};
use clap::{Parser, ValueEnum};
use log::{debug, info};

/// Render an image as colored Unicode half blocks.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The image file to render.
    image: PathBuf,

    /// Color mode of the output.
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Target width in pixels (terminal columns).
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Target height in pixels (two per terminal row).
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Indexed mode: accept the first palette color closer than this; 0 for exact matching.
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<i32>,

    /// True-color mode: skip color codes within this distance of the previous one.
    #[arg(short, long)]
    bias: Option<u32>,

    /// TOML file with renderer settings. Command-line flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the escape codes as readable text instead of interpreting them.
    #[arg(short, long)]
    escape: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Indexed,
    #[value(alias = "rgb")]
    Truecolor,
}

impl Args {
    /// The settings given on the command line.
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            color_mode: self.mode.map(ColorMode::from),
            width: self.width,
            height: self.height,
            threshold: self.threshold,
            bias: self.bias,
        }
    }
}

impl From<Mode> for ColorMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Indexed => ColorMode::Indexed,
            Mode::Truecolor => ColorMode::TrueColor,
        }
    }
}

/// Picks the target size in pixels.
///
/// Explicit sizes win. With only one side given, the other follows the image's
/// aspect ratio. With neither, the image is shrunk to fit the terminal (one
/// pixel per column, two per row, keeping the last row free for the prompt).
fn fit_dimensions(
    (image_width, image_height): (usize, usize),
    (width, height): (Option<usize>, Option<usize>),
    (columns, rows): (usize, usize),
) -> (usize, usize) {
    let scaled = |value: usize, num: usize, den: usize| -> usize {
        ((value as f64 * num as f64 / den as f64).round() as usize).max(1)
    };
    match (width, height) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (width, scaled(image_height, width, image_width)),
        (None, Some(height)) => (scaled(image_width, height, image_height), height),
        (None, None) => {
            let max_width = columns.max(1);
            let max_height = rows.saturating_sub(1).max(1) * 2;
            if image_width <= max_width && image_height <= max_height {
                return (image_width, image_height);
            }
            let scale = (max_width as f64 / image_width as f64)
                .min(max_height as f64 / image_height as f64);
            (
                ((image_width as f64 * scale).round() as usize).clamp(1, max_width),
                ((image_height as f64 * scale).round() as usize).clamp(1, max_height),
            )
        }
    }
}

/// Merges command-line flags over the config file and fills in the target size.
///
/// A size is only taken as given when the flags or the file actually set it;
/// otherwise it comes from [`fit_dimensions`].
fn settings(
    overrides: PartialConfig,
    file: PartialConfig,
    image: (usize, usize),
    terminal: (usize, usize),
) -> Result<RendererConfig, RenderError> {
    let merged = overrides.or(file);
    let (width, height) = fit_dimensions(image, (merged.width, merged.height), terminal);
    PartialConfig {
        width: Some(width),
        height: Some(height),
        ..merged
    }
    .resolve()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => PartialConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PartialConfig::default(),
    };

    let image = image::open(&args.image)
        .with_context(|| format!("failed to open image {}", args.image.display()))?
        .to_rgba8();
    let (image_width, image_height) = (image.width() as usize, image.height() as usize);
    let pixels = PixelBuffer::from_rgba8(image_width, image_height, image.as_raw())
        .context("failed to read image pixels")?;
    debug!("loaded {} ({image_width}x{image_height})", args.image.display());

    let terminal = crossterm::terminal::size()
        .map(|(columns, rows)| (columns as usize, rows as usize))
        .unwrap_or((80, 24));
    let config = settings(
        args.overrides(),
        file_config,
        (image_width, image_height),
        terminal,
    )
    .context("invalid renderer settings")?;
    info!(
        "rendering {} at {}x{} ({})",
        args.image.display(),
        config.width,
        config.height,
        config.color_mode
    );

    let mut renderer = ImageRenderer::new(config)?;
    let mut out = BufWriter::new(io::stdout().lock());
    if args.escape {
        let image = renderer.render(&pixels)?;
        writeln!(out, "{}", escape(image.text()))?;
    } else {
        renderer.render_to(&pixels, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
