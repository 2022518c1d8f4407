//! Row-major 2D buffers.
//!
//! This module defines [`Grid`], the flat row-major buffer used both for source
//! pixels ([`PixelBuffer`]) and for composed terminal cells.
//!
//! A `Grid` always holds exactly `width * height` elements. Grids built from
//! caller-supplied data are validated eagerly, see [`Grid::from_vec`].

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use crate::error::{RenderError, Result};
use crate::util;

/// A buffer of RGB pixels, row-major, top row first.
pub type PixelBuffer = Grid<[u8; 3]>;

/// A fixed-size 2D buffer stored as a single row-major `Vec`.
///
/// # Example
///
/// ```rust
/// use blockpix::rendering::grid::PixelBuffer;
///
/// let pixels = PixelBuffer::from_vec(2, 1, vec![[255, 0, 0], [0, 0, 255]]).unwrap();
/// assert_eq!(pixels[(1, 0)], [0, 0, 255]);
///
/// // two pixels cannot fill a 2x2 buffer
/// assert!(PixelBuffer::from_vec(2, 2, vec![[0, 0, 0]; 2]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Grid {{ width: {}, height: {}, data: {:?} }}",
            self.width, self.height, self.data
        )
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every element set to `value`.
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Wraps row-major `data` as a `width`×`height` grid.
    ///
    /// Fails with [`RenderError::InvalidDimension`] if either dimension is zero
    /// and with [`RenderError::MalformedBuffer`] if `data` does not hold exactly
    /// `width * height` elements.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if data.len() != expected {
            return Err(RenderError::MalformedBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(self.get_index(x, y))
    }

    /// Sets the element at `(x, y)` if the coordinates are in bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            let idx = self.get_index(x, y);
            self.data[idx] = value;
        }
    }

    /// The backing row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns row `y` as a slice.
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1))
    }
}

impl Grid<[u8; 3]> {
    /// Builds a pixel buffer from packed RGB bytes, three bytes per pixel.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        check_byte_len(width, height, bytes.len(), 3)?;
        let data = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::from_vec(width, height, data)
    }

    /// Builds a pixel buffer from straight-alpha RGBA bytes, four bytes per pixel.
    ///
    /// Alpha is composited over a black backdrop before the pixel is stored.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        check_byte_len(width, height, bytes.len(), 4)?;
        let data = bytes
            .chunks_exact(4)
            .map(|px| util::blend_over_black([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::from_vec(width, height, data)
    }

    /// Builds a pixel buffer from packed `0xAARRGGBB` values.
    ///
    /// Alpha is composited over a black backdrop before the pixel is stored.
    pub fn from_argb(width: usize, height: usize, pixels: &[u32]) -> Result<Self> {
        let data = pixels.iter().map(|&argb| util::unpack_argb(argb)).collect();
        Self::from_vec(width, height, data)
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[self.get_index(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let idx = self.get_index(x, y);
        &mut self.data[idx]
    }
}

/// Rejects zero widths and heights.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimension { width, height });
    }
    Ok(())
}

fn check_byte_len(width: usize, height: usize, len: usize, bytes_per_pixel: usize) -> Result<()> {
    check_dimensions(width, height)?;
    let expected = width * height;
    if len != expected * bytes_per_pixel {
        return Err(RenderError::MalformedBuffer {
            expected,
            actual: len / bytes_per_pixel,
        });
    }
    Ok(())
}
