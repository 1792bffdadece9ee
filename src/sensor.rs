use crate::{
    accel::{Accel, AccelF64, Offsets},
    address::Address,
    error::Error,
    filter::LowpassFilter,
    range::Range,
    registers::{
        Register, AXIS_LEN, FILTER_ODR_LPF_MASK, PART_ID, POWER_CTL_STANDBY, RANGE_MASK, TEMP_LEN,
    },
    status::Status,
    temperature::Temperature,
};
use embedded_hal::i2c::I2c;

/// Analog Devices ADXL355 Driver
///
/// Every method is a single register transaction or a read followed by a
/// masked write. Nothing is retried; bus errors are returned as is.
pub struct Adxl355<I>
where
    I: I2c,
{
    i2c: I,
    address: u8,
    range: Range,
}

impl<I> Adxl355<I>
where
    I: I2c,
{
    /// Construct a new i2c driver for the ADXL355.
    ///
    /// No bus traffic happens here. The range used for scaling starts at the
    /// power-on default (±2g) until [`Adxl355::set_range`] succeeds.
    pub fn new(i2c: I, address: Address) -> Self {
        Self {
            i2c,
            address: address.into(),
            range: Range::default(),
        }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .map_err(Error::WriteReadError)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .map_err(Error::WriteError)
    }

    pub(crate) fn read_register(&mut self, reg: Register) -> Result<u8, Error<I>> {
        let mut buf = [0; 1];
        self.read(&[reg as u8], &mut buf)?;
        Ok(buf[0])
    }

    pub(crate) fn read_registers<'a>(
        &mut self,
        reg: Register,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], Error<I>> {
        self.read(&[reg as u8], buf)?;
        Ok(buf)
    }

    pub(crate) fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value])
    }

    /// Replace the bits under `mask`, keeping the rest of the register.
    fn update_register(&mut self, reg: Register, mask: u8, bits: u8) -> Result<(), Error<I>> {
        let value = self.read_register(reg)?;
        self.write_register(reg, (value & !mask) | (bits & mask))
    }

    /// Check the part id register.
    pub fn verify_device(&mut self) -> Result<(), Error<I>> {
        let id = self.read_register(Register::PartId)?;
        if id == PART_ID {
            Ok(())
        } else {
            Err(Error::WrongDevice(id))
        }
    }

    pub fn set_range(&mut self, range: Range) -> Result<(), Error<I>> {
        self.update_register(Register::Range, RANGE_MASK, range.code())?;
        self.range = range;
        Ok(())
    }

    /// Like [`Adxl355::set_range`], for a raw code coming from configuration.
    /// An undefined code is rejected before any bus traffic.
    pub fn set_range_code(&mut self, code: u8) -> Result<(), Error<I>> {
        let range = Range::from_code(code).ok_or(Error::InvalidRange(code))?;
        self.set_range(range)
    }

    /// Read the range back from the device.
    /// The reserved code 0 reads as ±2g.
    pub fn range(&mut self) -> Result<Range, Error<I>> {
        let value = self.read_register(Register::Range)?;
        Ok(Range::from_code(value & RANGE_MASK).unwrap_or_default())
    }

    /// The range used to scale samples, as last written by this driver.
    pub fn cached_range(&self) -> Range {
        self.range
    }

    pub fn set_lowpass_filter(&mut self, filter: LowpassFilter) -> Result<(), Error<I>> {
        self.update_register(Register::Filter, FILTER_ODR_LPF_MASK, filter.code())
    }

    /// Like [`Adxl355::set_lowpass_filter`], for a raw code coming from
    /// configuration. An undefined code is rejected before any bus traffic.
    pub fn set_lowpass_filter_code(&mut self, code: u8) -> Result<(), Error<I>> {
        let filter = LowpassFilter::from_code(code).ok_or(Error::InvalidLowpassFilter(code))?;
        self.set_lowpass_filter(filter)
    }

    pub fn lowpass_filter(&mut self) -> Result<LowpassFilter, Error<I>> {
        let code = self.read_register(Register::Filter)? & FILTER_ODR_LPF_MASK;
        LowpassFilter::from_code(code).ok_or(Error::InvalidLowpassFilter(code))
    }

    /// Leave standby and start measuring. No-op if already running.
    pub fn start(&mut self) -> Result<(), Error<I>> {
        let value = self.read_register(Register::PowerCtl)?;
        if value & POWER_CTL_STANDBY != 0 {
            self.write_register(Register::PowerCtl, value & !POWER_CTL_STANDBY)?;
        }
        Ok(())
    }

    /// Enter standby. No-op if already in standby.
    pub fn stop(&mut self) -> Result<(), Error<I>> {
        let value = self.read_register(Register::PowerCtl)?;
        if value & POWER_CTL_STANDBY == 0 {
            self.write_register(Register::PowerCtl, value | POWER_CTL_STANDBY)?;
        }
        Ok(())
    }

    pub fn is_running(&mut self) -> Result<bool, Error<I>> {
        let value = self.read_register(Register::PowerCtl)?;
        Ok(value & POWER_CTL_STANDBY == 0)
    }

    pub fn status(&mut self) -> Result<Status, Error<I>> {
        self.read_register(Register::Status).map(Status::from)
    }

    /// Whether a fresh sample is available. Does not wait for one.
    pub fn data_ready(&mut self) -> Result<bool, Error<I>> {
        Ok(self.status()?.data_ready())
    }

    pub fn temperature(&mut self) -> Result<Temperature, Error<I>> {
        let mut data = [0; TEMP_LEN];
        self.read_registers(Register::Temp2, &mut data)?;
        Ok(Temperature::from_bytes(data))
    }

    /// Read X, Y and Z in one block transaction.
    pub fn accel(&mut self) -> Result<Accel, Error<I>> {
        let mut data = [0; AXIS_LEN];
        self.read_registers(Register::XData3, &mut data)?;
        Ok(Accel::from_bytes(data))
    }

    /// Read X, Y and Z in m/s² at the cached range, plus `offsets`.
    pub fn scaled_accel(&mut self, offsets: &Offsets) -> Result<AccelF64, Error<I>> {
        let range = self.range;
        Ok(self.accel()?.scaled(range, offsets))
    }
}
