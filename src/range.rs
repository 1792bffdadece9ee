//! ADXL355 Full Scale Range
//!
//! The range selects the measurement span and with it the sensitivity of
//! the 20-bit output. Each step up doubles the span and halves the number
//! of LSB per g.

/// Full scale range, as encoded in bits 1..0 of the range register.
///
/// Code 0 is reserved by the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Range {
    /// ±2.048 g
    G2 = 1,
    /// ±4.096 g
    G4 = 2,
    /// ±8.192 g
    G8 = 3,
}

impl Range {
    /// Sensitivity in LSB per g.
    pub const fn lsb_per_g(self) -> f64 {
        match self {
            Self::G2 => 256000.0,
            Self::G4 => 128000.0,
            Self::G8 => 64000.0,
        }
    }

    /// Returns `None` for codes outside 1..=3.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::G2),
            2 => Some(Self::G4),
            3 => Some(Self::G8),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Default for Range {
    /// Power-on range of the device.
    fn default() -> Self {
        Self::G2
    }
}

/// LSB per g for a raw range code. Unknown codes fall back to the 2g factor.
pub const fn conversion_factor(code: u8) -> f64 {
    match Range::from_code(code) {
        Some(range) => range.lsb_per_g(),
        None => Range::G2.lsb_per_g(),
    }
}
