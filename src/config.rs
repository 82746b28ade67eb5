//! Display configuration types and builder

pub use crate::error::{BuilderError, MIN_RESET_PHASE_MS};

/// Native panel width in pixels
pub const WIDTH: u16 = 800;

/// Native panel height in pixels
pub const HEIGHT: u16 = 480;

/// Default pause between busy polls in milliseconds
pub const DEFAULT_BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Default maximum number of busy polls before [`Error::BusyTimeout`](crate::Error::BusyTimeout)
///
/// With the default interval this allows roughly 40 seconds, comfortably
/// above the panel's full three-colour refresh time.
pub const DEFAULT_BUSY_POLL_LIMIT: u32 = 4_000;

/// Default number of extra attempts for a failed bus transfer
pub const DEFAULT_TRANSFER_RETRIES: u8 = 2;

/// Panel geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (source outputs)
    pub width: u16,
    /// Height in pixels (gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width or height is zero
    /// - width % 8 != 0 (planes are packed 8 pixels per byte)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || !width.is_multiple_of(8) || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether the geometry can be packed into bit-planes
    ///
    /// Same rule as [`Dimensions::new`]; fields are public, so values built
    /// by struct literal are checked again before use.
    pub fn is_valid(&self) -> bool {
        self.width != 0 && self.width.is_multiple_of(8) && self.height != 0
    }

    /// Number of bytes in one row of a bit-plane
    pub fn row_bytes(&self) -> usize {
        self.width as usize / 8
    }

    /// Calculate required bit-plane size in bytes
    pub fn buffer_size(&self) -> usize {
        self.row_bytes() * self.height as usize
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

/// Display configuration
///
/// Holds the panel geometry, the register values written during
/// initialization and the timing of the synchronization loops.
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Time RST is held low during the hardware reset pulse
    pub reset_hold_ms: u32,
    /// Time waited after RST is released
    pub reset_release_ms: u32,
    /// POWER_SETTING parameters (voltage rails)
    pub power_setting: [u8; 4],
    /// PANEL_SETTING parameter (resolution / scan mode)
    pub panel_setting: u8,
    /// VCOM_AND_DATA_INTERVAL_SETTING parameters
    pub vcom_data_interval: [u8; 2],
    /// TCON_SETTING parameter
    pub tcon_setting: u8,
    /// Pause between DISPLAY_REFRESH and the first busy poll
    pub refresh_delay_ms: u32,
    /// DEEP_SLEEP check code
    pub deep_sleep_check: u8,
    /// Pause between busy polls (0 = spin)
    pub busy_poll_interval_ms: u32,
    /// Maximum busy polls before timing out (0 = wait forever)
    pub busy_poll_limit: u32,
    /// Extra attempts for a failed bus transfer
    pub transfer_retries: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            reset_hold_ms: MIN_RESET_PHASE_MS,
            reset_release_ms: MIN_RESET_PHASE_MS,
            power_setting: [0x07, 0x07, 0x3F, 0x3F],
            panel_setting: 0x0F,
            vcom_data_interval: [0x11, 0x07],
            // Same value as the LUT_WHITE opcode; the controller expects the literal byte.
            tcon_setting: 0x22,
            refresh_delay_ms: 100,
            deep_sleep_check: 0xA5,
            busy_poll_interval_ms: DEFAULT_BUSY_POLL_INTERVAL_MS,
            busy_poll_limit: DEFAULT_BUSY_POLL_LIMIT,
            transfer_retries: DEFAULT_TRANSFER_RETRIES,
        }
    }
}

/// Builder for constructing display configuration
///
/// Every setting defaults to the GDEY075Z08 values, so `Builder::new().build()`
/// yields a working configuration for the 800x480 panel.
///
/// # Example
///
/// ```
/// use gdey075z08::{Builder, Dimensions};
///
/// let config = match Builder::new()
///     .dimensions(Dimensions::default())
///     .busy_poll_limit(1_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.dimensions.buffer_size(), 48_000);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with the panel defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set how long RST is held low during the reset pulse
    pub fn reset_hold_ms(mut self, ms: u32) -> Self {
        self.config.reset_hold_ms = ms;
        self
    }

    /// Set how long to wait after releasing RST
    pub fn reset_release_ms(mut self, ms: u32) -> Self {
        self.config.reset_release_ms = ms;
        self
    }

    /// Set POWER_SETTING parameters
    pub fn power_setting(mut self, values: [u8; 4]) -> Self {
        self.config.power_setting = values;
        self
    }

    /// Set PANEL_SETTING parameter
    pub fn panel_setting(mut self, value: u8) -> Self {
        self.config.panel_setting = value;
        self
    }

    /// Set VCOM_AND_DATA_INTERVAL_SETTING parameters
    pub fn vcom_data_interval(mut self, values: [u8; 2]) -> Self {
        self.config.vcom_data_interval = values;
        self
    }

    /// Set TCON_SETTING parameter
    pub fn tcon_setting(mut self, value: u8) -> Self {
        self.config.tcon_setting = value;
        self
    }

    /// Set the pause between DISPLAY_REFRESH and busy polling
    pub fn refresh_delay_ms(mut self, ms: u32) -> Self {
        self.config.refresh_delay_ms = ms;
        self
    }

    /// Set the DEEP_SLEEP check code
    pub fn deep_sleep_check(mut self, value: u8) -> Self {
        self.config.deep_sleep_check = value;
        self
    }

    /// Set the pause between busy polls
    ///
    /// Set to 0 to poll back-to-back.
    pub fn busy_poll_interval_ms(mut self, ms: u32) -> Self {
        self.config.busy_poll_interval_ms = ms;
        self
    }

    /// Set the maximum number of busy polls
    ///
    /// Set to 0 to disable the timeout.
    pub fn busy_poll_limit(mut self, polls: u32) -> Self {
        self.config.busy_poll_limit = polls;
        self
    }

    /// Set how many times a failed transfer is retried
    pub fn transfer_retries(mut self, retries: u8) -> Self {
        self.config.transfer_retries = retries;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ResetTooShort` if either reset phase is shorter
    /// than [`MIN_RESET_PHASE_MS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let Config {
            reset_hold_ms,
            reset_release_ms,
            ..
        } = self.config;
        if reset_hold_ms < MIN_RESET_PHASE_MS || reset_release_ms < MIN_RESET_PHASE_MS {
            return Err(BuilderError::ResetTooShort {
                hold_ms: reset_hold_ms,
                release_ms: reset_release_ms,
            });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions_match_panel() {
        let dims = Dimensions::default();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 480);
        assert_eq!(dims.row_bytes(), 100);
        assert_eq!(dims.buffer_size(), 48_000);
    }

    #[test]
    fn test_dimensions_width_must_be_byte_aligned() {
        assert_eq!(
            Dimensions::new(799, 480),
            Err(BuilderError::InvalidDimensions {
                width: 799,
                height: 480
            })
        );
        assert!(Dimensions::new(0, 480).is_err());
        assert!(Dimensions::new(800, 0).is_err());
        assert!(Dimensions::new(8, 1).is_ok());
    }

    #[test]
    fn test_is_valid_rechecks_literal_dimensions() {
        assert!(Dimensions::default().is_valid());
        assert!(!Dimensions { width: 4, height: 1 }.is_valid());
        assert!(!Dimensions { width: 799, height: 480 }.is_valid());
        assert!(!Dimensions { width: 800, height: 0 }.is_valid());
    }

    #[test]
    fn test_buffer_size_for_valid_geometries() {
        for (width, height) in [(8, 1), (16, 2), (640, 384), (800, 480)] {
            let dims = Dimensions::new(width, height).unwrap();
            assert_eq!(dims.buffer_size(), width as usize * height as usize / 8);
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.reset_hold_ms, 200);
        assert_eq!(config.reset_release_ms, 200);
        assert_eq!(config.power_setting, [0x07, 0x07, 0x3F, 0x3F]);
        assert_eq!(config.panel_setting, 0x0F);
        assert_eq!(config.vcom_data_interval, [0x11, 0x07]);
        assert_eq!(config.tcon_setting, 0x22);
        assert_eq!(config.refresh_delay_ms, 100);
        assert_eq!(config.deep_sleep_check, 0xA5);
    }

    #[test]
    fn test_builder_rejects_short_reset() {
        let result = Builder::new().reset_release_ms(199).build();
        assert_eq!(
            result,
            Err(BuilderError::ResetTooShort {
                hold_ms: 200,
                release_ms: 199
            })
        );
    }

    #[test]
    fn test_builder_accepts_longer_reset() {
        let config = Builder::new()
            .reset_hold_ms(250)
            .reset_release_ms(300)
            .build()
            .unwrap();
        assert_eq!(config.reset_hold_ms, 250);
        assert_eq!(config.reset_release_ms, 300);
    }

    #[test]
    fn test_builder_overrides() {
        let dims = Dimensions::new(16, 2).unwrap();
        let config = Builder::new()
            .dimensions(dims)
            .busy_poll_interval_ms(0)
            .busy_poll_limit(0)
            .transfer_retries(5)
            .build()
            .unwrap();
        assert_eq!(config.dimensions, dims);
        assert_eq!(config.busy_poll_interval_ms, 0);
        assert_eq!(config.busy_poll_limit, 0);
        assert_eq!(config.transfer_retries, 5);
    }
}
