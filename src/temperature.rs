/// Temperature reading from the ADXL355's internal temperature sensor.
///
/// Note: This measures the die temperature, not the ambient temperature.
/// The sensor is uncalibrated; absolute readings can be off by a few degrees
/// between parts, while the slope is consistent.
///
/// # Example
/// ```
/// # use adxl355::temperature::Temperature;
/// let temp = Temperature::new(1852);
///
/// // Intercept of the transfer function
/// let celsius = temp.celsius(); // Returns 19.21°C
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Temperature {
    pub(crate) raw: u16,
}

/// Raw reading at the intercept temperature
pub const TEMP_BIAS: f64 = 1852.0;
/// LSB per °C
pub const TEMP_SLOPE: f64 = 9.05;
/// Intercept temperature in °C
pub const TEMP_OFFSET: f64 = 19.21;

impl Temperature {
    pub fn new(raw: u16) -> Self {
        Self { raw }
    }

    /// Compose from TEMP2 (high) and TEMP1 (low).
    pub fn from_bytes(data: [u8; 2]) -> Self {
        Self {
            raw: u16::from_be_bytes(data),
        }
    }

    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Temperature = (1852 - TEMP) / 9.05 + 19.21
    pub fn celsius(&self) -> f64 {
        (TEMP_BIAS - self.raw as f64) / TEMP_SLOPE + TEMP_OFFSET
    }
}
