//! Core display operations
//!
//! [`Display`] owns the [`BusAdapter`] for the lifetime of the session and
//! issues the panel's fixed register sequences. The session is an explicit
//! state machine:
//!
//! ```text
//! Uninitialized --initialize--> Ready --sleep--> Sleeping
//!       ^                        |  ^               |
//!       |                        display/clear      |
//!       +---- bus fault ---------+                  |
//!       +------------------ initialize -------------+
//! ```
//!
//! The panel gives no acknowledgement besides its BUSY line, so every
//! asynchronous step (power on, refresh, power off) is followed by a busy poll.

use crate::color::Color;
use crate::command::Command;
use crate::config::{Config, Dimensions};
use crate::encoder::{self, PixelSource};
use crate::error::{EncodeError, Error, MIN_RESET_PHASE_MS};
use crate::interface::{BusAdapter, Level, PinRole};

type DisplayResult<B, T = ()> = core::result::Result<T, Error<B>>;

/// Opcode issued during initialization that has no name in the vendor table
const UNDOCUMENTED_INIT_OPCODE: u8 = 0x15;

/// Lifecycle of a display session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not yet initialized, or a bus fault left the panel in an unknown state
    #[default]
    Uninitialized,
    /// Powered and configured, accepting frames
    Ready,
    /// In deep sleep; only [`Display::initialize`] (hardware reset) leaves this state
    Sleeping,
}

impl core::fmt::Display for SessionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Ready => write!(f, "ready"),
            Self::Sleeping => write!(f, "sleeping"),
        }
    }
}

/// Core display driver for the GDEY075Z08
///
/// ## Example
///
/// ```rust,no_run
/// use gdey075z08::{BusAdapter, Color, Config, Display, Level, PinRole};
///
/// struct Board;
///
/// impl BusAdapter for Board {
///     type Error = ();
///     fn hardware_init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn write_pin(&mut self, _role: PinRole, _level: Level) -> Result<(), ()> { Ok(()) }
///     fn read_pin(&mut self, _role: PinRole) -> Result<Level, ()> { Ok(Level::High) }
///     fn delay_ms(&mut self, _ms: u32) {}
///     fn transfer(&mut self, _bytes: &[u8]) -> Result<(), ()> { Ok(()) }
/// }
///
/// let mut display = Display::new(Board, Config::default());
/// if display.initialize().is_err() {
///     return;
/// }
/// let _ = display.clear(Color::White);
/// let _ = display.sleep();
/// ```
pub struct Display<B>
where
    B: BusAdapter,
{
    /// Bus adapter
    bus: B,
    /// Display configuration
    config: Config,
    /// Current session state
    state: SessionState,
}

impl<B> Display<B>
where
    B: BusAdapter,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent to the panel until [`initialize`](Self::initialize).
    pub fn new(bus: B, config: Config) -> Self {
        Self {
            bus,
            config,
            state: SessionState::Uninitialized,
        }
    }

    /// Bring the panel from power-off (or deep sleep) to [`SessionState::Ready`]
    ///
    /// Runs the adapter bring-up, a hardware reset pulse, then the power and
    /// panel register sequence. Blocks until the panel confirms power-on.
    ///
    /// # Errors
    ///
    /// - `Error::BusInit` if the adapter bring-up fails (no pin is touched)
    /// - `Error::BusTransfer`, `Error::Pin`, `Error::BusyTimeout` on bus faults
    ///
    /// On error the session is left [`SessionState::Uninitialized`].
    pub fn initialize(&mut self) -> DisplayResult<B> {
        log::info!("Initializing panel (was {})", self.state);
        self.state = SessionState::Uninitialized;

        let result = self
            .bus
            .hardware_init()
            .map_err(Error::BusInit)
            .and_then(|()| self.power_up());
        self.fault(result)?;

        self.state = SessionState::Ready;
        log::info!("Panel ready");
        Ok(())
    }

    fn power_up(&mut self) -> DisplayResult<B> {
        self.hardware_reset()?;

        let power_setting = self.config.power_setting;
        self.write_command(Command::PowerSetting.opcode())?;
        self.write_data(&power_setting)?;

        self.write_command(Command::PowerOn.opcode())?;
        self.poll_idle(&mut || false)?;

        self.write_command(Command::PanelSetting.opcode())?;
        self.write_data(&[self.config.panel_setting])?;

        self.write_command(UNDOCUMENTED_INIT_OPCODE)?;
        self.write_data(&[0x00])?;

        let vcom_data_interval = self.config.vcom_data_interval;
        self.write_command(Command::VcomAndDataIntervalSetting.opcode())?;
        self.write_data(&vcom_data_interval)?;

        self.write_command(Command::TconSetting.opcode())?;
        self.write_data(&[self.config.tcon_setting])?;

        Ok(())
    }

    /// Reset sequence: LOW -> hold -> HIGH -> release
    ///
    /// Each phase lasts at least [`MIN_RESET_PHASE_MS`], even for a `Config`
    /// that did not go through [`Builder::build`](crate::config::Builder::build).
    fn hardware_reset(&mut self) -> DisplayResult<B> {
        self.set_pin(PinRole::Reset, Level::Low)?;
        self.bus.delay_ms(self.config.reset_hold_ms.max(MIN_RESET_PHASE_MS));
        self.set_pin(PinRole::Reset, Level::High)?;
        self.bus.delay_ms(self.config.reset_release_ms.max(MIN_RESET_PHASE_MS));
        Ok(())
    }

    /// Transmit both bit-planes and refresh the panel
    ///
    /// Returns once the panel reports idle, i.e. after the physical refresh
    /// has completed.
    ///
    /// # Arguments
    ///
    /// * `black` - Black plane (bit clear = black)
    /// * `red` - Red plane (bit set = red)
    ///
    /// # Errors
    ///
    /// - `Error::InvalidState` unless the session is [`SessionState::Ready`]
    /// - `Error::Encode` if the configured dimensions cannot be packed into bytes
    /// - `Error::BufferSizeMismatch` if a plane is not `dimensions().buffer_size()` bytes
    ///   (checked before any bus activity)
    /// - bus faults, which drop the session to [`SessionState::Uninitialized`]
    pub fn display(&mut self, black: &[u8], red: &[u8]) -> DisplayResult<B> {
        self.ensure_ready("display a frame")?;
        let required = self.plane_size()?;
        for provided in [black.len(), red.len()] {
            if provided != required {
                return Err(Error::BufferSizeMismatch { required, provided });
            }
        }

        log::debug!("Transmitting {required}-byte planes");
        let result = self.transmit_frame(black.iter().copied(), red.iter().copied());
        self.fault(result)
    }

    /// Encode a grayscale source and display it
    ///
    /// # Errors
    ///
    /// `Error::Encode` if the source size differs from the panel dimensions,
    /// raised before any bus activity; otherwise as [`display`](Self::display).
    pub fn show<S: PixelSource + ?Sized>(&mut self, source: &S) -> DisplayResult<B> {
        self.ensure_ready("display a frame")?;
        let frame = encoder::encode(source, self.config.dimensions)?;
        self.display(frame.black(), frame.red())
    }

    /// Fill the whole panel with one color and refresh
    ///
    /// Streams constant plane bytes without allocating a frame.
    pub fn clear(&mut self, color: Color) -> DisplayResult<B> {
        self.ensure_ready("clear the panel")?;
        let size = self.plane_size()?;
        log::debug!("Clearing panel to {color:?}");
        let result = self.transmit_frame(
            core::iter::repeat_n(color.bw_byte(), size),
            core::iter::repeat_n(color.red_byte(), size),
        );
        self.fault(result)
    }

    fn plane_size(&self) -> DisplayResult<B, usize> {
        let dims = self.config.dimensions;
        if !dims.is_valid() {
            return Err(EncodeError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            }
            .into());
        }
        Ok(dims.buffer_size())
    }

    fn transmit_frame(
        &mut self,
        black: impl IntoIterator<Item = u8>,
        red: impl IntoIterator<Item = u8>,
    ) -> DisplayResult<B> {
        self.write_command(Command::DataStartTransmission1.opcode())?;
        for byte in black {
            self.write_byte(byte)?;
        }
        self.write_command(Command::DataStartTransmission2.opcode())?;
        for byte in red {
            self.write_byte(byte)?;
        }

        self.write_command(Command::DisplayRefresh.opcode())?;
        self.bus.delay_ms(self.config.refresh_delay_ms);
        self.poll_idle(&mut || false)?;
        log::debug!("Refresh complete");
        Ok(())
    }

    /// Power off and enter deep sleep
    ///
    /// Terminal until [`initialize`](Self::initialize) performs a fresh
    /// hardware reset.
    pub fn sleep(&mut self) -> DisplayResult<B> {
        self.ensure_ready("enter deep sleep")?;
        let result = self.power_down();
        self.fault(result)?;
        self.state = SessionState::Sleeping;
        log::info!("Panel in deep sleep");
        Ok(())
    }

    fn power_down(&mut self) -> DisplayResult<B> {
        self.write_command(Command::PowerOff.opcode())?;
        self.poll_idle(&mut || false)?;
        self.write_command(Command::DeepSleep.opcode())?;
        self.write_data(&[self.config.deep_sleep_check])
    }

    /// Block until the panel deasserts BUSY
    ///
    /// Each poll issues GET_STATUS and reads the BUSY pin; a high level means
    /// idle. Bounded by [`Config::busy_poll_limit`].
    ///
    /// # Errors
    ///
    /// `Error::BusyTimeout` if the poll limit is reached.
    pub fn wait_until_idle(&mut self) -> DisplayResult<B> {
        self.wait_until_idle_cancellable(|| false)
    }

    /// Like [`wait_until_idle`](Self::wait_until_idle), with a cancellation check
    ///
    /// `cancelled` is consulted after every busy reading; returning `true`
    /// aborts the wait with `Error::Cancelled`.
    pub fn wait_until_idle_cancellable<C>(&mut self, mut cancelled: C) -> DisplayResult<B>
    where
        C: FnMut() -> bool,
    {
        self.ensure_ready("wait for the panel")?;
        let result = self.poll_idle(&mut cancelled);
        self.fault(result)
    }

    fn poll_idle(&mut self, cancelled: &mut dyn FnMut() -> bool) -> DisplayResult<B> {
        let limit = self.config.busy_poll_limit;
        let mut polls: u32 = 0;
        loop {
            self.write_command(Command::GetStatus.opcode())?;
            polls = polls.saturating_add(1);

            let level = self.bus.read_pin(PinRole::Busy).map_err(Error::Pin)?;
            if level == Level::High {
                log::trace!("Panel idle after {polls} polls");
                return Ok(());
            }
            if limit > 0 && polls >= limit {
                return Err(Error::BusyTimeout { polls });
            }
            if cancelled() {
                return Err(Error::Cancelled);
            }
            if self.config.busy_poll_interval_ms > 0 {
                self.bus.delay_ms(self.config.busy_poll_interval_ms);
            }
        }
    }

    /// Send a command byte
    ///
    /// Rejected while sleeping.
    pub fn send_command(&mut self, command: Command) -> DisplayResult<B> {
        self.send_raw_command(command.opcode())
    }

    /// Send an opcode that has no [`Command`] variant
    pub fn send_raw_command(&mut self, opcode: u8) -> DisplayResult<B> {
        self.ensure_awake("send a command")?;
        let result = self.write_command(opcode);
        self.fault(result)
    }

    /// Send one data byte
    ///
    /// Rejected while sleeping.
    pub fn send_data(&mut self, byte: u8) -> DisplayResult<B> {
        self.ensure_awake("send data")?;
        let result = self.write_byte(byte);
        self.fault(result)
    }

    fn write_command(&mut self, opcode: u8) -> DisplayResult<B> {
        self.set_pin(PinRole::DataCommand, Level::Low)?;
        self.transfer(&[opcode])
    }

    fn write_data(&mut self, data: &[u8]) -> DisplayResult<B> {
        for byte in data {
            self.write_byte(*byte)?;
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> DisplayResult<B> {
        self.set_pin(PinRole::DataCommand, Level::High)?;
        self.transfer(&[byte])
    }

    fn set_pin(&mut self, role: PinRole, level: Level) -> DisplayResult<B> {
        self.bus.write_pin(role, level).map_err(Error::Pin)
    }

    fn transfer(&mut self, bytes: &[u8]) -> DisplayResult<B> {
        let retries = self.config.transfer_retries;
        let mut attempt = 0;
        loop {
            match self.bus.transfer(bytes) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    log::warn!("Bus transfer failed ({e:?}), retry {attempt}/{retries}");
                }
                Err(e) => return Err(Error::BusTransfer(e)),
            }
        }
    }

    fn ensure_ready(&self, operation: &'static str) -> DisplayResult<B> {
        if self.state != SessionState::Ready {
            return Err(Error::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    fn ensure_awake(&self, operation: &'static str) -> DisplayResult<B> {
        if self.state == SessionState::Sleeping {
            return Err(Error::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Drop the session to `Uninitialized` if a bus operation failed
    fn fault<T>(&mut self, result: DisplayResult<B, T>) -> DisplayResult<B, T> {
        if let Err(e) = &result {
            log::error!("{e}; panel state is now unknown");
            self.state = SessionState::Uninitialized;
        }
        result
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get panel dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the driver and return the bus adapter
    pub fn release(self) -> B {
        self.bus
    }
}
