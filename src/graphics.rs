//! Graphics support via embedded-graphics
//!
//! This module provides [`GrayFrame`], an 8-bit luminance canvas that
//! implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! trait from the embedded-graphics ecosystem and the [`PixelSource`] trait of
//! the frame encoder.
//!
//! Drawing happens in grayscale; colors are only decided when the frame is
//! encoded, using the thresholds of [`Color::from_luminance`](crate::Color::from_luminance).
//! Draw with luminance 0 for black, 128 for red and 255 for white.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Gray8,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use gdey075z08::{BusAdapter, Config, Dimensions, Display, GrayFrame, Level, PinRole};
//! # struct Board;
//! # impl BusAdapter for Board {
//! #     type Error = ();
//! #     fn hardware_init(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn write_pin(&mut self, _role: PinRole, _level: Level) -> Result<(), ()> { Ok(()) }
//! #     fn read_pin(&mut self, _role: PinRole) -> Result<Level, ()> { Ok(Level::High) }
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! #     fn transfer(&mut self, _bytes: &[u8]) -> Result<(), ()> { Ok(()) }
//! # }
//! # let mut display = Display::new(Board, Config::default());
//! # if display.initialize().is_err() { return; }
//! let mut frame = GrayFrame::new(Dimensions::default());
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
//!     .draw(&mut frame);
//!
//! // Mid-tones render red
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Gray8::new(128), 2))
//!     .draw(&mut frame);
//!
//! let _ = Text::new(
//!     "Hello, E-Paper!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Gray8::BLACK),
//! )
//! .draw(&mut frame);
//!
//! // Encode and refresh the physical panel
//! let _ = display.show(&frame);
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{Gray8, GrayColor},
    prelude::Pixel,
};

use crate::config::Dimensions;
use crate::encoder::PixelSource;
use crate::error::EncodeError;

/// Row-major 8-bit luminance canvas
///
/// ## Type Parameters
///
/// * `B` - Buffer type holding `width * height` luminance bytes
pub struct GrayFrame<B = Vec<u8>>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Canvas dimensions
    dims: Dimensions,
    /// Luminance, one byte per pixel
    buffer: B,
}

impl GrayFrame<Vec<u8>> {
    /// Allocate an all-white canvas
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            buffer: vec![Gray8::WHITE.luma(); dims.width as usize * dims.height as usize],
        }
    }
}

impl<B> GrayFrame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap an existing luminance buffer
    ///
    /// The buffer content is kept, so a decoded grayscale image can be
    /// drawn over and then shown.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::BufferSizeMismatch` if the buffer is not
    /// `width * height` bytes.
    pub fn from_buffer(dims: Dimensions, buffer: B) -> Result<Self, EncodeError> {
        let required = dims.width as usize * dims.height as usize;
        let provided = buffer.as_ref().len();
        if provided != required {
            return Err(EncodeError::BufferSizeMismatch { required, provided });
        }
        Ok(Self { dims, buffer })
    }

    /// Fill the whole canvas with one luminance
    pub fn clear(&mut self, color: Gray8) {
        self.buffer.as_mut().fill(color.luma());
    }

    /// Canvas dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Raw luminance bytes
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Consume the canvas and return its buffer
    pub fn into_buffer(self) -> B {
        self.buffer
    }
}

impl<B> PixelSource for GrayFrame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn width(&self) -> u16 {
        self.dims.width
    }

    fn height(&self) -> u16 {
        self.dims.height
    }

    fn luminance(&self, x: u16, y: u16) -> u8 {
        self.buffer.as_ref()[y as usize * self.dims.width as usize + x as usize]
    }
}

impl<B> DrawTarget for GrayFrame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.dims.width as usize;
        let height = self.dims.height as usize;
        let buffer = self.buffer.as_mut();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if x >= width || y >= height {
                continue;
            }
            buffer[y * width + x] = color.luma();
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        GrayFrame::clear(self, color);
        Ok(())
    }
}

impl<B> OriginDimensions for GrayFrame<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.dims.width as u32, self.dims.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;
    use crate::encoder::encode;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    fn dims() -> Dimensions {
        Dimensions::new(16, 4).unwrap()
    }

    #[test]
    fn test_new_frame_is_white() {
        let frame = GrayFrame::new(dims());
        assert_eq!(frame.size(), Size::new(16, 4));
        assert!(frame.buffer().iter().all(|l| *l == 255));
        let encoded = encode(&frame, dims()).unwrap();
        assert!(encoded.black().iter().all(|b| *b == 0xFF));
        assert!(encoded.red().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_draw_black_and_red_rectangles() {
        let mut frame = GrayFrame::new(dims());
        // Left 8 columns of row 0 black
        Rectangle::new(Point::new(0, 0), Size::new(8, 1))
            .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
            .draw(&mut frame)
            .unwrap();
        // Right 8 columns of row 1 red
        Rectangle::new(Point::new(8, 1), Size::new(8, 1))
            .into_styled(PrimitiveStyle::with_fill(Gray8::new(128)))
            .draw(&mut frame)
            .unwrap();

        let encoded = encode(&frame, dims()).unwrap();
        assert_eq!(
            encoded.black(),
            &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            encoded.red(),
            &[0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut frame = GrayFrame::new(dims());
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), Gray8::BLACK),
                Pixel(Point::new(16, 0), Gray8::BLACK),
                Pixel(Point::new(0, 4), Gray8::BLACK),
                Pixel(Point::new(15, 3), Gray8::BLACK),
            ])
            .unwrap();
        let dark = frame.buffer().iter().filter(|l| **l == 0).count();
        assert_eq!(dark, 1);
        assert_eq!(frame.luminance(15, 3), 0);
    }

    #[test]
    fn test_clear() {
        let mut frame = GrayFrame::new(dims());
        DrawTarget::clear(&mut frame, Gray8::new(100)).unwrap();
        assert!(frame.buffer().iter().all(|l| *l == 100));
    }

    #[test]
    fn test_from_buffer_checks_length() {
        let result = GrayFrame::from_buffer(dims(), [0u8; 63]);
        assert!(matches!(
            result,
            Err(EncodeError::BufferSizeMismatch {
                required: 64,
                provided: 63
            })
        ));

        let frame = GrayFrame::from_buffer(dims(), [7u8; 64]).unwrap();
        assert_eq!(frame.luminance(3, 2), 7);
        assert_eq!(frame.into_buffer(), [7u8; 64]);
    }
}
