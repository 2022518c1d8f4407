//! The image-to-text rendering pipeline.
//!
//! **Sub-modules:**
//!
//! *   [`grid`](crate::rendering::grid): [`Grid`](grid::Grid), the row-major buffer, and [`PixelBuffer`](grid::PixelBuffer).
//! *   [`palette`](crate::rendering::palette): the fixed 16-color palette.
//! *   [`color`](crate::rendering::color): [`ColorMode`](color::ColorMode) and [`StyledColor`](color::StyledColor).
//! *   [`matcher`](crate::rendering::matcher): nearest palette color search and true-color passthrough.
//! *   [`resample`](crate::rendering::resample): nearest-neighbor resizing.
//! *   [`cell`](crate::rendering::cell): terminal cells and half-block compositing.
//! *   [`emitter`](crate::rendering::emitter): cell grids to escape-coded text.
//! *   [`renderer`](crate::rendering::renderer): [`ImageRenderer`](renderer::ImageRenderer), which ties it all together.
//!
//! **Rendering process:**
//!
//! 1.  The source [`PixelBuffer`](grid::PixelBuffer) is resampled to the target size if needed.
//! 2.  Each pair of pixel rows becomes one row of [`Cell`](cell::Cell)s. Colors are resolved
//!     by the matcher for the active [`ColorMode`](color::ColorMode).
//! 3.  The emitter writes the cells, skipping escape codes that repeat the previous cell's.

pub mod cell;
pub mod color;
pub mod emitter;
pub mod grid;
pub mod matcher;
pub mod palette;
pub mod renderer;
pub mod resample;
