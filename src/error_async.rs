//! Error types for asynchronous ADXL355 operations.
//!
//! Mirrors [`crate::error`] for drivers built on `embedded-hal-async`.

use core::fmt::{Debug, Formatter};
use embedded_hal_async::i2c::I2c;

pub use crate::error::ErrorKind;

/// Error types that can occur during async sensor operations.
///
/// Represents failures in I2C communication, rejected settings and
/// device validation.
pub enum Error<I>
where
    I: I2c,
{
    /// Error occurred during an I2C write operation
    WriteError(I::Error),
    /// Error occurred during an I2C write-read operation
    WriteReadError(I::Error),
    /// Range code outside 1..=3, nothing was written
    InvalidRange(u8),
    /// Filter code outside 0..=10, nothing was written
    InvalidLowpassFilter(u8),
    /// Device did not respond as an ADXL355
    WrongDevice(u8),
}

impl<I> Error<I>
where
    I: I2c,
{
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WriteError(_) | Self::WriteReadError(_) => ErrorKind::BusFault,
            Self::InvalidRange(_) | Self::InvalidLowpassFilter(_) => ErrorKind::InvalidArgument,
            Self::WrongDevice(_) => ErrorKind::WrongDevice,
        }
    }
}

impl<I> Debug for Error<I>
where
    I: I2c,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::WriteReadError(e) => f.debug_tuple("WriteReadError").field(e).finish(),
            Self::WriteError(e) => f.debug_tuple("WriteError").field(e).finish(),
            Self::InvalidRange(code) => f.debug_tuple("InvalidRange").field(code).finish(),
            Self::InvalidLowpassFilter(code) => {
                f.debug_tuple("InvalidLowpassFilter").field(code).finish()
            }
            Self::WrongDevice(id) => f.debug_tuple("WrongDevice").field(id).finish(),
        }
    }
}
