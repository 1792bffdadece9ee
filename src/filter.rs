//! ADXL355 Output Data Rate and Lowpass Filter
//!
//! The ODR_LPF field selects the output data rate of the digital filter
//! chain. The lowpass corner follows at one quarter of the data rate, so
//! slower settings trade bandwidth for lower noise.

/// ODR_LPF settings, named after the output data rate in Hz.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LowpassFilter {
    /// Widest bandwidth, power-on default
    Hz4000 = 0,
    Hz2000 = 1,
    Hz1000 = 2,
    Hz500 = 3,
    Hz250 = 4,
    Hz125 = 5,
    Hz62_5 = 6,
    Hz31_25 = 7,
    Hz15_625 = 8,
    Hz7_813 = 9,
    /// Narrowest bandwidth
    Hz3_906 = 10,
}

impl LowpassFilter {
    /// Returns `None` for codes outside the eleven defined settings.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Hz4000,
            1 => Self::Hz2000,
            2 => Self::Hz1000,
            3 => Self::Hz500,
            4 => Self::Hz250,
            5 => Self::Hz125,
            6 => Self::Hz62_5,
            7 => Self::Hz31_25,
            8 => Self::Hz15_625,
            9 => Self::Hz7_813,
            10 => Self::Hz3_906,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Frequency label in Hz, as printed in the datasheet.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hz4000 => "4000",
            Self::Hz2000 => "2000",
            Self::Hz1000 => "1000",
            Self::Hz500 => "500",
            Self::Hz250 => "250",
            Self::Hz125 => "125",
            Self::Hz62_5 => "62.5",
            Self::Hz31_25 => "31.25",
            Self::Hz15_625 => "15.625",
            Self::Hz7_813 => "7.813",
            Self::Hz3_906 => "3.906",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LowpassFilter;

    #[test]
    fn test_codes_cover_the_field() {
        for code in 0..=10 {
            let filter = LowpassFilter::from_code(code).unwrap();
            assert_eq!(filter.code(), code);
        }
        assert_eq!(LowpassFilter::from_code(11), None);
        assert_eq!(LowpassFilter::from_code(0x0F), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LowpassFilter::Hz4000.label(), "4000");
        assert_eq!(LowpassFilter::Hz62_5.label(), "62.5");
        assert_eq!(LowpassFilter::Hz3_906.label(), "3.906");
    }
}
