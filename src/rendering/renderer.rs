//! The image renderer.
//!
//! [`ImageRenderer`] runs the whole pipeline for one source frame:
//!
//! 1.  Resample the source to the target size, unless it already has it.
//! 2.  Walk the pixels two rows at a time and compose one [`Cell`] per column,
//!     pairing the last row with black when the height is odd.
//! 3.  Serialize the cells with the [`Emitter`].
//!
//! A renderer keeps its resample buffer, cell grid and output text between
//! calls so that rendering successive frames of the same size does not
//! allocate. Rendering therefore takes `&mut self`: one instance serves one
//! caller at a time. Give each thread its own renderer, or wrap a shared one in
//! a `Mutex`.

use std::fmt;
use std::io::Write;

use log::{debug, trace};

use crate::config::RendererConfig;
use crate::error::Result;
use crate::rendering::cell::{Cell, compose_pixels};
use crate::rendering::color::ColorMode;
use crate::rendering::emitter::Emitter;
use crate::rendering::grid::{Grid, PixelBuffer, check_dimensions};
use crate::rendering::matcher::ColorMatcher;
use crate::rendering::resample;

/// A rendered frame: escape-coded text plus what it was rendered with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    text: String,
    width: usize,
    height: usize,
    color_mode: ColorMode,
}

impl RenderedImage {
    /// The escape-coded text, one line per text row.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width of the target grid in pixels (= text columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the target grid in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of text rows, two pixel rows each.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(2)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for RenderedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders pixel buffers into terminal text at a fixed target size.
///
/// ```rust
/// use blockpix::config::RendererConfig;
/// use blockpix::rendering::color::ColorMode;
/// use blockpix::rendering::grid::PixelBuffer;
/// use blockpix::rendering::renderer::ImageRenderer;
///
/// let mut renderer = ImageRenderer::new(RendererConfig::new(ColorMode::Indexed, 2, 2)).unwrap();
/// let red = PixelBuffer::from_vec(2, 2, vec![[178, 0, 0]; 4]).unwrap();
/// let image = renderer.render(&red).unwrap();
/// assert_eq!(image.text(), "\x1b[31m██\x1b[0m\n");
/// ```
#[derive(Debug)]
pub struct ImageRenderer {
    config: RendererConfig,
    matcher: ColorMatcher,
    emitter: Emitter,
    /// Target of the resampling step, reused across frames.
    resize_buffer: PixelBuffer,
    /// Composed cells of the current frame.
    cells: Grid<Cell>,
    /// Text of the current frame.
    output: String,
}

impl ImageRenderer {
    /// Creates a renderer, rejecting a zero-sized target right away.
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.validate()?;
        let RendererConfig { width, height, .. } = config;
        let rows = height.div_ceil(2);
        let matcher = ColorMatcher::new(config.color_mode, config.match_strategy());

        debug!(
            "new {} renderer: {width}x{height} pixels, {:?}, bias {}",
            matcher.mode(),
            matcher.strategy(),
            config.bias
        );

        Ok(Self {
            config,
            matcher,
            emitter: Emitter::with_bias(config.bias),
            resize_buffer: Grid::new(width, height, [0, 0, 0]),
            cells: Grid::new(width, rows, Cell::default()),
            // worst case: two true-color codes plus a glyph per cell, a reset per row
            output: String::with_capacity(39 * width * height + 5 * height),
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn color_mode(&self) -> ColorMode {
        self.config.color_mode
    }

    /// Renders `source` and returns the frame.
    pub fn render(&mut self, source: &PixelBuffer) -> Result<RenderedImage> {
        self.render_frame(source)?;
        Ok(RenderedImage {
            text: self.output.clone(),
            width: self.config.width,
            height: self.config.height,
            color_mode: self.config.color_mode,
        })
    }

    /// Renders `source` straight into `sink`, without building a [`RenderedImage`].
    ///
    /// Useful for playing back frames one after another.
    pub fn render_to<W: Write>(&mut self, source: &PixelBuffer, sink: &mut W) -> Result<()> {
        self.render_frame(source)?;
        sink.write_all(self.output.as_bytes())?;
        Ok(())
    }

    fn render_frame(&mut self, source: &PixelBuffer) -> Result<()> {
        check_dimensions(source.width(), source.height())?;
        let (width, height) = (self.config.width, self.config.height);

        let pixels = if source.width() == width && source.height() == height {
            source
        } else {
            resample::resize_into(source, &mut self.resize_buffer)?;
            &self.resize_buffer
        };

        compose_cells(pixels, &self.matcher, &mut self.cells);

        self.output.clear();
        self.emitter.emit(&self.cells, &mut self.output)?;
        trace!(
            "rendered {}x{} frame into {} bytes",
            width,
            height,
            self.output.len()
        );
        Ok(())
    }
}

/// Composes one cell per column for every pair of pixel rows.
///
/// `cells` must be `pixels.width()` wide and `ceil(pixels.height() / 2)` high.
fn compose_cells(pixels: &PixelBuffer, matcher: &ColorMatcher, cells: &mut Grid<Cell>) {
    const BLACK: [u8; 3] = [0, 0, 0];

    let mut rows = pixels.rows();
    let mut y = 0;
    while let Some(top) = rows.next() {
        match rows.next() {
            Some(bottom) => {
                for (x, (&t, &b)) in top.iter().zip(bottom).enumerate() {
                    cells[(x, y)] = compose_pixels(t, b, matcher);
                }
            }
            None => {
                for (x, &t) in top.iter().enumerate() {
                    cells[(x, y)] = compose_pixels(t, BLACK, matcher);
                }
            }
        }
        y += 1;
    }
}

/// Renders `source` once at `width`×`height` with default settings.
///
/// Builds a throwaway [`ImageRenderer`]; keep a renderer around instead when
/// rendering many frames.
pub fn render(
    source: &PixelBuffer,
    width: usize,
    height: usize,
    color_mode: ColorMode,
) -> Result<RenderedImage> {
    ImageRenderer::new(RendererConfig::new(color_mode, width, height))?.render(source)
}
