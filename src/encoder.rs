//! Frame encoding
//!
//! Converts an 8-bit grayscale [`PixelSource`] into the two packed bit-planes
//! the panel expects, using the thresholds of [`Color::from_luminance`].
//!
//! Planes are row-major, 8 pixels per byte, most significant bit first:
//! pixel `(x, y)` lives in byte `y * width / 8 + x / 8` under mask `0x80 >> (x % 8)`.
//!
//! ## Example
//!
//! ```
//! use gdey075z08::{Dimensions, GrayImage, encoder};
//!
//! let dims = match Dimensions::new(8, 1) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let pixels = [0, 255, 128, 255, 255, 255, 255, 0];
//! let image = match GrayImage::new(8, 1, &pixels) {
//!     Ok(image) => image,
//!     Err(_) => return,
//! };
//! let frame = match encoder::encode(&image, dims) {
//!     Ok(frame) => frame,
//!     Err(_) => return,
//! };
//! assert_eq!(frame.black(), &[0b0111_1110]);
//! assert_eq!(frame.red(), &[0b0010_0000]);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Color;
use crate::config::Dimensions;
use crate::error::EncodeError;

/// A grayscale image addressable by pixel
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u16;

    /// Height in pixels
    fn height(&self) -> u16;

    /// Luminance at `(x, y)`; callers stay within `width() x height()`
    fn luminance(&self, x: u16, y: u16) -> u8;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u16 {
        (**self).width()
    }

    fn height(&self) -> u16 {
        (**self).height()
    }

    fn luminance(&self, x: u16, y: u16) -> u8 {
        (**self).luminance(x, y)
    }
}

/// Borrowed row-major 8-bit luminance image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrayImage<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> GrayImage<'a> {
    /// Wrap a row-major luminance buffer
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::BufferSizeMismatch` if `data.len() != width * height`.
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, EncodeError> {
        let required = width as usize * height as usize;
        if data.len() != required {
            return Err(EncodeError::BufferSizeMismatch {
                required,
                provided: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

impl PixelSource for GrayImage<'_> {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn luminance(&self, x: u16, y: u16) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Black and red bit-planes for one full frame
///
/// Created per display request and consumed by
/// [`Display::display`](crate::display::Display::display).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    black: Vec<u8>,
    red: Vec<u8>,
}

impl FrameBuffer {
    /// All-white frame for the given dimensions
    pub fn new(dims: Dimensions) -> Self {
        let size = dims.buffer_size();
        Self {
            black: vec![Color::White.bw_byte(); size],
            red: vec![Color::White.red_byte(); size],
        }
    }

    /// Black plane (bit clear = black)
    pub fn black(&self) -> &[u8] {
        &self.black
    }

    /// Red plane (bit set = red)
    pub fn red(&self) -> &[u8] {
        &self.red
    }

    /// Take ownership of `(black, red)`
    pub fn into_planes(self) -> (Vec<u8>, Vec<u8>) {
        (self.black, self.red)
    }
}

/// Encode a pixel source into a freshly allocated [`FrameBuffer`]
///
/// Pure and deterministic: the same source always yields the same planes.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` if `dims` cannot be packed into
/// bytes, or `EncodeError::DimensionMismatch` if the source size differs from it.
/// Sources are never cropped or scaled.
pub fn encode<S: PixelSource + ?Sized>(
    source: &S,
    dims: Dimensions,
) -> Result<FrameBuffer, EncodeError> {
    check_dimensions(source, dims)?;
    let mut frame = FrameBuffer::new(dims);
    encode_into(source, dims, &mut frame.black, &mut frame.red)?;
    Ok(frame)
}

/// Encode a pixel source into caller-provided planes
///
/// Both planes are overwritten entirely, so buffers can be reused across frames.
///
/// # Errors
///
/// - `EncodeError::InvalidDimensions` if `dims` width is zero or not a multiple of 8,
///   or its height is zero
/// - `EncodeError::DimensionMismatch` if the source size differs from `dims`
/// - `EncodeError::BufferSizeMismatch` if a plane is not `dims.buffer_size()` bytes
pub fn encode_into<S: PixelSource + ?Sized>(
    source: &S,
    dims: Dimensions,
    black: &mut [u8],
    red: &mut [u8],
) -> Result<(), EncodeError> {
    check_dimensions(source, dims)?;
    let required = dims.buffer_size();
    for provided in [black.len(), red.len()] {
        if provided != required {
            return Err(EncodeError::BufferSizeMismatch { required, provided });
        }
    }

    let row_bytes = dims.row_bytes();
    let rows = black
        .chunks_exact_mut(row_bytes)
        .zip(red.chunks_exact_mut(row_bytes));
    for (y, (black_row, red_row)) in rows.enumerate() {
        let y = y as u16;
        for (x8, (bw_byte, red_byte)) in black_row.iter_mut().zip(red_row.iter_mut()).enumerate() {
            let mut bw = Color::White.bw_byte();
            let mut chroma = Color::White.red_byte();
            for i in 0..8 {
                let mask = 0x80u8 >> i;
                let x = (x8 * 8 + i) as u16;
                match Color::from_luminance(source.luminance(x, y)) {
                    Color::Black => bw &= !mask,
                    Color::Red => chroma |= mask,
                    Color::White => {}
                }
            }
            *bw_byte = bw;
            *red_byte = chroma;
        }
    }
    Ok(())
}

fn check_dimensions<S: PixelSource + ?Sized>(
    source: &S,
    dims: Dimensions,
) -> Result<(), EncodeError> {
    if !dims.is_valid() {
        return Err(EncodeError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        });
    }
    if source.width() != dims.width || source.height() != dims.height {
        return Err(EncodeError::DimensionMismatch {
            expected_width: dims.width,
            expected_height: dims.height,
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}
