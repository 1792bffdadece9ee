//! ADXL355 I2C Address Configuration
//!
//! The ADXL355 answers on one of two 7-bit addresses selected by the
//! ASEL pin:
//! - 0x1D (default, ASEL low)
//! - 0x53 (alternate, ASEL high)

/// Represents an ADXL355 I2C address.
///
/// Note: These are 7-bit addresses. Some I2C implementations may
/// require left-shifting by 1 to create the 8-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Address(pub u8);

impl Address {
    /// Address with ASEL tied high.
    pub const fn alternate() -> Self {
        Self(0x53)
    }
}

impl Default for Address {
    /// Returns the default I2C address (0x1D), ASEL tied to GND.
    fn default() -> Self {
        Self(0x1D)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<u8> for Address {
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}
