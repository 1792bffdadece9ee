//! ADXL355 status flags.

use crate::registers::{STATUS_DATA_READY, STATUS_NVM_BUSY};

/// Content of the status register.
///
/// Reading the register clears the data-ready flag on the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Status(u8);

impl Status {
    /// A complete X, Y, Z sample is waiting to be read
    pub fn data_ready(&self) -> bool {
        self.0 & STATUS_DATA_READY != 0
    }

    /// The non-volatile memory is busy programming or loading
    pub fn nvm_busy(&self) -> bool {
        self.0 & STATUS_NVM_BUSY != 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
