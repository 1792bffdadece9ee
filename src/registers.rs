//! ADXL355 Register Map and Bitfield Masks
//!
//! The ADXL355 is controlled through byte-wide registers on a single page:
//! - Identification registers: fixed device and part ids
//! - Data registers: status, temperature and the 20-bit axis samples
//! - Configuration registers: output data rate / lowpass filter, range, power
//!
//! Multi-byte values are stored most significant byte first and the
//! register pointer auto-increments, so a block read starting at
//! [`Register::XData3`] returns X, Y and Z back to back.

#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Analog Devices id (0x00), reads 0xAD
    DevIdAd = 0x00,
    /// MEMS id (0x01), reads 0x1D
    DevIdMst = 0x01,
    /// Part id (0x02), reads 0xED
    PartId = 0x02,
    /// Silicon revision (0x03)
    RevId = 0x03,

    /// Status register (0x04)
    /// Data ready, FIFO full/overrun, activity and NVM busy flags
    Status = 0x04,

    // Temperature Data Registers
    /// High byte of temperature reading
    Temp2 = 0x06,
    /// Low byte of temperature reading
    Temp1 = 0x07,

    // Accelerometer Data Registers (20 bits left-aligned in 3 bytes)
    /// Bits 19..12 of X-axis acceleration
    XData3 = 0x08,
    /// Bits 11..4 of X-axis acceleration
    XData2 = 0x09,
    /// Bits 3..0 of X-axis acceleration, low nibble reserved
    XData1 = 0x0A,
    /// Bits 19..12 of Y-axis acceleration
    YData3 = 0x0B,
    /// Bits 11..4 of Y-axis acceleration
    YData2 = 0x0C,
    /// Bits 3..0 of Y-axis acceleration, low nibble reserved
    YData1 = 0x0D,
    /// Bits 19..12 of Z-axis acceleration
    ZData3 = 0x0E,
    /// Bits 11..4 of Z-axis acceleration
    ZData2 = 0x0F,
    /// Bits 3..0 of Z-axis acceleration, low nibble reserved
    ZData1 = 0x10,

    /// Filter register (0x28)
    /// ODR_LPF in bits 3..0, high pass corner in bits 6..4
    Filter = 0x28,

    /// Range register (0x2C)
    /// Full scale in bits 1..0, interrupt polarity and I2C speed above
    Range = 0x2C,

    /// Power Control register (0x2D)
    /// Standby, temperature off and data-ready off bits
    PowerCtl = 0x2D,
}

/// Expected content of [`Register::DevIdAd`]
pub const DEVID_AD: u8 = 0xAD;
/// Expected content of [`Register::DevIdMst`]
pub const DEVID_MST: u8 = 0x1D;
/// Expected content of [`Register::PartId`]
pub const PART_ID: u8 = 0xED;

/// Standby bit, set means the measurement core is idle
pub const POWER_CTL_STANDBY: u8 = 0x01;
/// Disables the temperature processing
pub const POWER_CTL_TEMP_OFF: u8 = 0x02;
/// Forces the DRDY output to zero
pub const POWER_CTL_DRDY_OFF: u8 = 0x04;

pub const RANGE_MASK: u8 = 0x03;
pub const FILTER_ODR_LPF_MASK: u8 = 0x0F;

pub const STATUS_DATA_READY: u8 = 0x01;
pub const STATUS_NVM_BUSY: u8 = 0x10;

/// Bytes read by one temperature transaction (TEMP2, TEMP1)
pub const TEMP_LEN: usize = 2;
/// Bytes read by one acceleration transaction (3 per axis)
pub const AXIS_LEN: usize = 9;
