//! Hardware interface abstraction
//!
//! This module provides the [`BusAdapter`] trait, the only way the driver
//! touches hardware, and the [`Interface`] struct implementing it on top of
//! embedded-hal v1.0.
//!
//! ## Hardware Requirements
//!
//! The GDEY075Z08 requires:
//! - SPI bus (MOSI + SCK, CS handled by the [`SpiDevice`])
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output, low=command, high=data)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, **low while busy**)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use gdey075z08::{BusAdapter, Interface, Level, PinRole};
//! # use core::convert::Infallible;
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
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockDelay);
//!
//! let _ = interface.hardware_init();
//!
//! // Send a command byte
//! let _ = interface.write_pin(PinRole::DataCommand, Level::Low);
//! let _ = interface.transfer(&[0x71]);
//!
//! // Check whether the panel is idle
//! let idle = matches!(interface.read_pin(PinRole::Busy), Ok(Level::High));
//! # let _ = idle;
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Logical role of a control pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRole {
    /// Reset line (output, active low)
    Reset,
    /// Data/Command select line (output, low=command, high=data)
    DataCommand,
    /// Busy status line (input, low while the panel is busy)
    Busy,
}

/// Digital pin level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Logic low
    Low,
    /// Logic high
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Capability the driver needs from the board
///
/// This trait abstracts over the SPI transfer primitive, the control pins and
/// a blocking delay, allowing the [`Display`](crate::display::Display) to run
/// against real hardware or a test double.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If the board exposes
/// its bus differently (bit-banged SPI, pins behind an expander, a Linux
/// spidev with manual chip-select), implement this trait on your own type.
pub trait BusAdapter {
    /// Error type for adapter operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// One-time adapter bring-up
    ///
    /// Called first by [`Display::initialize`](crate::display::Display::initialize).
    /// Any error is fatal to the session.
    fn hardware_init(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Drive an output pin to the given level
    fn write_pin(&mut self, role: PinRole, level: Level) -> InterfaceResult<(), Self::Error>;

    /// Read the current level of an input pin
    fn read_pin(&mut self, role: PinRole) -> InterfaceResult<Level, Self::Error>;

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Transmit a byte buffer over the serial bus
    ///
    /// The driver selects command or data mode with
    /// [`PinRole::DataCommand`] before calling this.
    fn transfer(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// The pin cannot be driven (it is wired as an input)
    NotAnOutput(PinRole),
    /// The pin cannot be read (it is wired as an output)
    NotAnInput(PinRole),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::NotAnOutput(role) => write!(f, "{role:?} pin is not an output"),
            Self::NotAnInput(role) => write!(f, "{role:?} pin is not an input"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// embedded-hal implementation of [`BusAdapter`]
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
/// * `DELAY` - Delay provider implementing [`DelayNs`]
///
/// ## Example
///
/// ```rust,no_run
/// use gdey075z08::{Config, Display, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::digital::{InputPin, OutputPin};
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl InputPin for MockPin {
/// #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let interface = Interface::new(
///     MockSpi,   // SpiDevice
///     MockPin,   // DC: OutputPin
///     MockPin,   // RST: OutputPin
///     MockPin,   // BUSY: InputPin
///     MockDelay, // DelayNs
/// );
///
/// let _display = Display::new(interface, Config::default());
/// ```
pub struct Interface<SPI, DC, RST, BUSY, DELAY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (low while busy)
    busy: BUSY,
    /// Blocking delay provider
    delay: DELAY,
}

impl<SPI, DC, RST, BUSY, DELAY> Interface<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, low while busy)
    /// * `delay` - Delay provider used for reset timing and busy polling
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
        }
    }

    /// Consume the interface and return the peripherals
    pub fn release(self) -> (SPI, DC, RST, BUSY, DELAY) {
        (self.spi, self.dc, self.rst, self.busy, self.delay)
    }
}

fn drive<P: OutputPin>(pin: &mut P, level: Level) -> InterfaceResult<(), P::Error> {
    match level {
        Level::Low => pin.set_low(),
        Level::High => pin.set_high(),
    }
}

impl<SPI, DC, RST, BUSY, DELAY, PinErr> BusAdapter for Interface<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    DELAY: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn hardware_init(&mut self) -> InterfaceResult<(), Self::Error> {
        // Pin directions are fixed by the HAL types; park outputs at idle levels.
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn write_pin(&mut self, role: PinRole, level: Level) -> InterfaceResult<(), Self::Error> {
        match role {
            PinRole::Reset => drive(&mut self.rst, level).map_err(InterfaceError::Pin),
            PinRole::DataCommand => drive(&mut self.dc, level).map_err(InterfaceError::Pin),
            PinRole::Busy => Err(InterfaceError::NotAnOutput(role)),
        }
    }

    fn read_pin(&mut self, role: PinRole) -> InterfaceResult<Level, Self::Error> {
        match role {
            PinRole::Busy => self
                .busy
                .is_high()
                .map(Level::from)
                .map_err(InterfaceError::Pin),
            PinRole::Reset | PinRole::DataCommand => Err(InterfaceError::NotAnInput(role)),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn transfer(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.spi.write(bytes).map_err(InterfaceError::Spi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl core::fmt::Display for MockError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "mock error")
        }
    }

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        Spi(u8),
        Dc(bool),
        Rst(bool),
        Delay(u32),
    }

    type Log<'a> = &'a RefCell<Vec<Op>>;

    struct MockSpi<'a> {
        log: Log<'a>,
        fail: bool,
    }

    impl SpiErrorType for MockSpi<'_> {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            for op in operations.iter() {
                if let embedded_hal::spi::Operation::Write(bytes) = op {
                    self.log
                        .borrow_mut()
                        .extend(bytes.iter().map(|b| Op::Spi(*b)));
                }
            }
            Ok(())
        }
    }

    struct MockOutput<'a> {
        log: Log<'a>,
        is_dc: bool,
    }

    impl ErrorType for MockOutput<'_> {
        type Error = MockError;
    }

    impl OutputPin for MockOutput<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.record(false);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.record(true);
            Ok(())
        }
    }

    impl MockOutput<'_> {
        fn record(&self, high: bool) {
            let op = if self.is_dc { Op::Dc(high) } else { Op::Rst(high) };
            self.log.borrow_mut().push(op);
        }
    }

    struct MockBusy {
        high: bool,
    }

    impl ErrorType for MockBusy {
        type Error = MockError;
    }

    impl InputPin for MockBusy {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    struct MockDelay<'a> {
        log: Log<'a>,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Op::Delay(ms));
        }
    }

    fn interface(
        log: Log<'_>,
        busy_high: bool,
        spi_fails: bool,
    ) -> Interface<MockSpi<'_>, MockOutput<'_>, MockOutput<'_>, MockBusy, MockDelay<'_>> {
        Interface::new(
            MockSpi {
                log,
                fail: spi_fails,
            },
            MockOutput { log, is_dc: true },
            MockOutput { log, is_dc: false },
            MockBusy { high: busy_high },
            MockDelay { log },
        )
    }

    #[test]
    fn test_hardware_init_parks_outputs() {
        let log = RefCell::new(Vec::new());
        let mut iface = interface(&log, true, false);
        iface.hardware_init().unwrap();
        assert_eq!(*log.borrow(), [Op::Dc(false), Op::Rst(true)]);
    }

    #[test]
    fn test_write_pin_routes_to_role() {
        let log = RefCell::new(Vec::new());
        let mut iface = interface(&log, true, false);
        iface.write_pin(PinRole::Reset, Level::Low).unwrap();
        iface.write_pin(PinRole::DataCommand, Level::High).unwrap();
        assert_eq!(*log.borrow(), [Op::Rst(false), Op::Dc(true)]);
    }

    #[test]
    fn test_busy_pin_is_input_only() {
        let log = RefCell::new(Vec::new());
        let mut iface = interface(&log, true, false);
        assert!(matches!(
            iface.write_pin(PinRole::Busy, Level::High),
            Err(InterfaceError::NotAnOutput(PinRole::Busy))
        ));
        assert!(matches!(
            iface.read_pin(PinRole::Reset),
            Err(InterfaceError::NotAnInput(PinRole::Reset))
        ));
    }

    #[test]
    fn test_read_busy_level() {
        let log = RefCell::new(Vec::new());
        let mut idle = interface(&log, true, false);
        assert_eq!(idle.read_pin(PinRole::Busy).unwrap(), Level::High);
        let mut busy = interface(&log, false, false);
        assert_eq!(busy.read_pin(PinRole::Busy).unwrap(), Level::Low);
    }

    #[test]
    fn test_transfer_and_delay() {
        let log = RefCell::new(Vec::new());
        let mut iface = interface(&log, true, false);
        iface.transfer(&[0x10, 0xFF]).unwrap();
        iface.delay_ms(200);
        assert_eq!(
            *log.borrow(),
            [Op::Spi(0x10), Op::Spi(0xFF), Op::Delay(200)]
        );
    }

    #[test]
    fn test_transfer_error_is_wrapped() {
        let log = RefCell::new(Vec::new());
        let mut iface = interface(&log, true, true);
        assert!(matches!(
            iface.transfer(&[0x00]),
            Err(InterfaceError::Spi(MockError))
        ));
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }
}
