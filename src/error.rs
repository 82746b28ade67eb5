//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! frame encoding ([`EncodeError`]) and display session operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`EncodeError`] - Errors converting a pixel source into bit-planes
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use gdey075z08::{Builder, BuilderError, Dimensions};
//!
//! // Width must be a multiple of 8
//! let result = Dimensions::new(801, 480);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//!
//! // Reset pulse must be held for at least 200ms
//! let result = Builder::new().reset_hold_ms(50).build();
//! assert!(matches!(result, Err(BuilderError::ResetTooShort { .. })));
//! ```

use crate::display::SessionState;
use crate::interface::BusAdapter;

/// Minimum duration of each phase of the hardware reset pulse, in milliseconds
pub const MIN_RESET_PHASE_MS: u32 = 200;

/// Errors that can occur when driving the panel
///
/// Generic over the bus adapter type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<B: BusAdapter> {
    /// The bus adapter failed its one-time bring-up
    ///
    /// Fatal: the session stays in [`SessionState::Uninitialized`] and no pin
    /// has been touched.
    BusInit(B::Error),
    /// A bus transfer still failed after all configured retries
    ///
    /// A dropped byte desynchronizes the panel's positional parameter parsing,
    /// so the session falls back to [`SessionState::Uninitialized`].
    BusTransfer(B::Error),
    /// Writing or reading a control pin failed
    Pin(B::Error),
    /// The panel kept BUSY asserted for the whole poll budget
    BusyTimeout {
        /// Number of GET_STATUS polls issued before giving up
        polls: u32,
    },
    /// The busy wait was cancelled by the caller
    Cancelled,
    /// The operation is not valid in the current session state
    InvalidState {
        /// Name of the rejected operation
        operation: &'static str,
        /// Session state at the time of the call
        state: SessionState,
    },
    /// A bit-plane has the wrong length for the configured dimensions
    BufferSizeMismatch {
        /// Required plane size in bytes
        required: usize,
        /// Provided plane size in bytes
        provided: usize,
    },
    /// The frame could not be encoded
    Encode(EncodeError),
}

impl<B: BusAdapter> core::fmt::Display for Error<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusInit(e) => write!(f, "Bus adapter initialization failed: {e:?}"),
            Self::BusTransfer(e) => write!(f, "Bus transfer failed: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::BusyTimeout { polls } => {
                write!(f, "Panel still busy after {polls} status polls")
            }
            Self::Cancelled => write!(f, "Busy wait cancelled"),
            Self::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while the panel is {state}")
            }
            Self::BufferSizeMismatch { required, provided } => write!(
                f,
                "Plane size mismatch: required {required} bytes, provided {provided}"
            ),
            Self::Encode(e) => write!(f, "Encode error: {e}"),
        }
    }
}

impl<B: BusAdapter + core::fmt::Debug> core::error::Error for Error<B> {}

impl<B: BusAdapter> From<EncodeError> for Error<B> {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

/// Errors that can occur when converting a pixel source into bit-planes
///
/// Encoding never touches the bus, so these errors are always recoverable by
/// supplying a correctly sized source or buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The pixel source size disagrees with the panel dimensions
    DimensionMismatch {
        /// Panel width in pixels
        expected_width: u16,
        /// Panel height in pixels
        expected_height: u16,
        /// Source width in pixels
        width: u16,
        /// Source height in pixels
        height: u16,
    },
    /// The target geometry cannot be packed 8 pixels per byte
    InvalidDimensions {
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
    /// A buffer has the wrong length
    BufferSizeMismatch {
        /// Required size in bytes
        required: usize,
        /// Provided size in bytes
        provided: usize,
    },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            } => write!(
                f,
                "Source is {width}x{height}, panel is {expected_width}x{expected_height}"
            ),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Cannot encode {width}x{height} (width must be a non-zero multiple of 8)"
            ),
            Self::BufferSizeMismatch { required, provided } => write!(
                f,
                "Buffer size mismatch: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for EncodeError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// A phase of the hardware reset pulse is shorter than [`MIN_RESET_PHASE_MS`]
    ResetTooShort {
        /// Configured reset hold (low) time
        hold_ms: u32,
        /// Configured reset release (high) time
        release_ms: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (width must be a non-zero multiple of 8)"
            ),
            Self::ResetTooShort {
                hold_ms,
                release_ms,
            } => write!(
                f,
                "Reset pulse {hold_ms}ms/{release_ms}ms is shorter than {MIN_RESET_PHASE_MS}ms"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
