//! Nearest-neighbor resampling with 16.16 fixed-point ratios.
//!
//! No filtering happens here; smoothing, if wanted, is up to whoever decodes
//! the image.

use log::debug;

use crate::error::Result;
use crate::rendering::grid::{Grid, check_dimensions};

/// Step through the source per target element, in 16.16 fixed point.
///
/// The `+ 1` compensates for the truncating division so that the last target
/// column or row lands on the last source column or row rather than before it.
#[inline]
fn ratio(source: usize, target: usize) -> usize {
    ((source << 16) / target) + 1
}

/// Resizes `source` to `width`×`height` using nearest-neighbor sampling.
///
/// When the source already has the requested size it is returned unchanged.
///
/// ```rust
/// use blockpix::rendering::grid::PixelBuffer;
/// use blockpix::rendering::resample::resize;
///
/// let src = PixelBuffer::from_vec(2, 1, vec![[255, 0, 0], [0, 0, 255]]).unwrap();
/// let wide = resize(&src, 4, 1).unwrap();
/// assert_eq!(wide.as_slice(), &[[255, 0, 0], [255, 0, 0], [0, 0, 255], [0, 0, 255]]);
/// ```
pub fn resize<T: Copy + Default>(source: &Grid<T>, width: usize, height: usize) -> Result<Grid<T>> {
    check_dimensions(width, height)?;
    if source.width() == width && source.height() == height {
        return Ok(source.clone());
    }
    let mut target = Grid::new(width, height, T::default());
    resize_into(source, &mut target)?;
    Ok(target)
}

/// Resamples `source` into `target`, keeping `target`'s dimensions.
///
/// This is the allocation-free variant used by the renderer to reuse one
/// scratch buffer across frames.
pub fn resize_into<T: Copy>(source: &Grid<T>, target: &mut Grid<T>) -> Result<()> {
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = (target.width(), target.height());
    check_dimensions(src_w, src_h)?;
    check_dimensions(dst_w, dst_h)?;

    debug!("resampling {src_w}x{src_h} -> {dst_w}x{dst_h}");

    let x_ratio = ratio(src_w, dst_w);
    let y_ratio = ratio(src_h, dst_h);
    let src = source.as_slice();
    let dst = target.as_mut_slice();
    for i in 0..dst_h {
        // large upscales can push the +1 correction past the last row/column
        let y2 = ((i * y_ratio) >> 16).min(src_h - 1);
        let src_row = &src[y2 * src_w..(y2 + 1) * src_w];
        let dst_row = &mut dst[i * dst_w..(i + 1) * dst_w];
        for (j, out) in dst_row.iter_mut().enumerate() {
            let x2 = ((j * x_ratio) >> 16).min(src_w - 1);
            *out = src_row[x2];
        }
    }
    Ok(())
}
