//! GDEY075Z08 E-Paper Display Driver
//!
//! A driver for the GDEY075Z08 7.5" 800x480 black/white/red e-paper panel.
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc`)
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Grayscale to two-plane frame encoding
//! - Bounded, cancellable busy waits
//! - Deep sleep
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use gdey075z08::{Builder, Display, GrayImage, Interface, HEIGHT, WIDTH};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (spi, dc, rst, busy, delay) = (MockSpi, MockPin, MockPin, MockPin, MockDelay);
//! let interface = Interface::new(spi, dc, rst, busy, delay);
//! let config = match Builder::new().busy_poll_limit(2_000).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! if display.initialize().is_err() {
//!     return;
//! }
//!
//! // Any 8-bit grayscale image of the panel size
//! let pixels = [255u8; WIDTH as usize * HEIGHT as usize];
//! let image = match GrayImage::new(WIDTH, HEIGHT, &pixels) {
//!     Ok(image) => image,
//!     Err(_) => return,
//! };
//! let _ = display.show(&image);
//! let _ = display.sleep();
//! ```

#![no_std]

extern crate alloc;

/// Color types for black/white/red e-paper panels
pub mod color;
/// Panel command opcodes
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Grayscale image to bit-plane encoding
pub mod encoder;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::Color;
pub use command::Command;
pub use config::{Builder, Config, Dimensions, HEIGHT, WIDTH};
pub use display::{Display, SessionState};
pub use encoder::{FrameBuffer, GrayImage, PixelSource};
pub use error::{BuilderError, EncodeError, Error};
pub use interface::{BusAdapter, Interface, InterfaceError, Level, PinRole};

#[cfg(feature = "graphics")]
pub use graphics::GrayFrame;
