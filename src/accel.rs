use crate::range::Range;

/// Standard gravity in m/s².
pub const GRAVITY: f64 = 9.80665;

/// Decode one axis from its three data bytes (DATA3, DATA2, DATA1).
///
/// The 20-bit two's complement sample is left-aligned: the low nibble of
/// DATA1 is padding and gets shifted out.
pub const fn decode_axis(data: [u8; 3]) -> i32 {
    let value = ((data[0] as u32) << 16 | (data[1] as u32) << 8 | data[2] as u32) >> 4;
    if value & (1 << 19) != 0 {
        value as i32 - (1 << 20)
    } else {
        value as i32
    }
}

/// Raw acceleration readings vector, sign-extended 20-bit counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Accel {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) z: i32,
}

impl Accel {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn from_bytes(data: [u8; 9]) -> Self {
        Self {
            x: decode_axis([data[0], data[1], data[2]]),
            y: decode_axis([data[3], data[4], data[5]]),
            z: decode_axis([data[6], data[7], data[8]]),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    /// Convert to m/s² at `range`, then add the per-axis calibration offsets.
    pub fn scaled(&self, range: Range, offsets: &Offsets) -> AccelF64 {
        let factor = range.lsb_per_g();
        AccelF64 {
            x: (self.x as f64) * GRAVITY / factor + offsets.x,
            y: (self.y as f64) * GRAVITY / factor + offsets.y,
            z: (self.z as f64) * GRAVITY / factor + offsets.z,
        }
    }
}

/// Calibration offsets in m/s², added after scaling.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Offsets {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Offsets {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Acceleration in m/s².
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelF64 {
    x: f64,
    y: f64,
    z: f64,
}

impl AccelF64 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }
}
