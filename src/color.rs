//! Color types for the black/white/red panel
//!
//! This module defines the [`Color`] enum and the two-threshold rule that
//! maps an 8-bit luminance onto it.
//!
//! ## Color Representation
//!
//! Each pixel is represented by one bit in each of two planes:
//!
//! | Color | Black plane | Red plane |
//! |-------|-------------|-----------|
//! | Black | 0           | 0         |
//! | White | 1           | 0         |
//! | Red   | 1           | 1         |
//!
//! ## Quantization
//!
//! | Luminance  | Color |
//! |------------|-------|
//! | 0..=63     | Black |
//! | 64..=191   | Red   |
//! | 192..=255  | White |
//!
//! ## Example
//!
//! ```
//! use gdey075z08::Color;
//!
//! assert_eq!(Color::from_luminance(10), Color::Black);
//! assert_eq!(Color::from_luminance(128), Color::Red);
//! assert_eq!(Color::from_luminance(250), Color::White);
//! ```

/// Luminance below this value renders black
pub const BLACK_THRESHOLD: u8 = 64;

/// Luminance below this value (and at least [`BLACK_THRESHOLD`]) renders red
pub const RED_THRESHOLD: u8 = 192;

/// Colors the panel can show
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black pixels
    Black,
    /// White pixels
    #[default]
    White,
    /// Red pixels
    Red,
}

impl Color {
    /// Quantize an 8-bit luminance value
    pub const fn from_luminance(luma: u8) -> Self {
        if luma < BLACK_THRESHOLD {
            Self::Black
        } else if luma < RED_THRESHOLD {
            Self::Red
        } else {
            Self::White
        }
    }

    /// Byte value filling eight pixels of this color in the black plane
    ///
    /// ```
    /// use gdey075z08::Color;
    ///
    /// assert_eq!(Color::Black.bw_byte(), 0x00);
    /// assert_eq!(Color::White.bw_byte(), 0xFF);
    /// assert_eq!(Color::Red.bw_byte(), 0xFF);
    /// ```
    pub const fn bw_byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White | Self::Red => 0xFF,
        }
    }

    /// Byte value filling eight pixels of this color in the red plane
    pub const fn red_byte(self) -> u8 {
        match self {
            Self::Red => 0xFF,
            Self::Black | Self::White => 0x00,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantization_boundaries() {
        assert_eq!(Color::from_luminance(0), Color::Black);
        assert_eq!(Color::from_luminance(63), Color::Black);
        assert_eq!(Color::from_luminance(64), Color::Red);
        assert_eq!(Color::from_luminance(191), Color::Red);
        assert_eq!(Color::from_luminance(192), Color::White);
        assert_eq!(Color::from_luminance(255), Color::White);
    }

    #[test]
    fn test_plane_bytes() {
        assert_eq!(Color::Black.red_byte(), 0x00);
        assert_eq!(Color::White.red_byte(), 0x00);
        assert_eq!(Color::Red.red_byte(), 0xFF);
        assert_eq!(Color::Red.bw_byte(), 0xFF);
    }
}
