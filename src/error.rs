use core::fmt::{Debug, Formatter};
use embedded_hal::i2c::I2c;

/// Broad classes of [`Error`], used to decide whether an operation is worth
/// retrying.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ErrorKind {
    /// The bus transaction failed (NACK, timeout, I/O error)
    BusFault,
    /// A range or filter code outside the defined settings
    InvalidArgument,
    /// The device at the address is not an ADXL355
    WrongDevice,
}

/// Error for sensor operations.
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
    /// Part id register did not read 0xED
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
