//! ADXL355 Asynchronous Driver Implementation
//!
//! This module provides a non-blocking interface to the ADXL355 built on
//! `embedded-hal-async`. It mirrors the blocking version (sensor.rs)
//! operation for operation:
//! - Range and output data rate / lowpass filter configuration
//! - Standby control
//! - Status, temperature and 20-bit acceleration reads
//! - Scaling to m/s² with calibration offsets

use crate::{
    accel::{Accel, AccelF64, Offsets},
    address::Address,
    error_async::Error,
    filter::LowpassFilter,
    range::Range,
    registers::{
        Register, AXIS_LEN, FILTER_ODR_LPF_MASK, PART_ID, POWER_CTL_STANDBY, RANGE_MASK, TEMP_LEN,
    },
    status::Status,
    temperature::Temperature,
};

use embedded_hal_async::i2c::I2c;

/// Analog Devices ADXL355 Driver
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
    /// Construct a new i2c driver for the ADXL355. No bus traffic happens here.
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

    pub(crate) async fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .await
            .map_err(Error::WriteReadError)
    }

    pub(crate) async fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(Error::WriteError)
    }

    pub(crate) async fn read_register(&mut self, reg: Register) -> Result<u8, Error<I>> {
        let mut buf = [0; 1];
        self.read(&[reg as u8], &mut buf).await?;
        Ok(buf[0])
    }

    pub(crate) async fn read_registers<'a>(
        &mut self,
        reg: Register,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], Error<I>> {
        self.read(&[reg as u8], buf).await?;
        Ok(buf)
    }

    pub(crate) async fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I>> {
        self.write(&[reg as u8, value]).await
    }

    async fn update_register(&mut self, reg: Register, mask: u8, bits: u8) -> Result<(), Error<I>> {
        let value = self.read_register(reg).await?;
        self.write_register(reg, (value & !mask) | (bits & mask))
            .await
    }

    pub async fn verify_device(&mut self) -> Result<(), Error<I>> {
        let id = self.read_register(Register::PartId).await?;
        if id == PART_ID {
            Ok(())
        } else {
            Err(Error::WrongDevice(id))
        }
    }

    pub async fn set_range(&mut self, range: Range) -> Result<(), Error<I>> {
        self.update_register(Register::Range, RANGE_MASK, range.code())
            .await?;
        self.range = range;
        Ok(())
    }

    pub async fn set_range_code(&mut self, code: u8) -> Result<(), Error<I>> {
        let range = Range::from_code(code).ok_or(Error::InvalidRange(code))?;
        self.set_range(range).await
    }

    pub async fn range(&mut self) -> Result<Range, Error<I>> {
        let value = self.read_register(Register::Range).await?;
        Ok(Range::from_code(value & RANGE_MASK).unwrap_or_default())
    }

    pub fn cached_range(&self) -> Range {
        self.range
    }

    pub async fn set_lowpass_filter(&mut self, filter: LowpassFilter) -> Result<(), Error<I>> {
        self.update_register(Register::Filter, FILTER_ODR_LPF_MASK, filter.code())
            .await
    }

    pub async fn set_lowpass_filter_code(&mut self, code: u8) -> Result<(), Error<I>> {
        let filter = LowpassFilter::from_code(code).ok_or(Error::InvalidLowpassFilter(code))?;
        self.set_lowpass_filter(filter).await
    }

    pub async fn lowpass_filter(&mut self) -> Result<LowpassFilter, Error<I>> {
        let code = self.read_register(Register::Filter).await? & FILTER_ODR_LPF_MASK;
        LowpassFilter::from_code(code).ok_or(Error::InvalidLowpassFilter(code))
    }

    pub async fn start(&mut self) -> Result<(), Error<I>> {
        let value = self.read_register(Register::PowerCtl).await?;
        if value & POWER_CTL_STANDBY != 0 {
            self.write_register(Register::PowerCtl, value & !POWER_CTL_STANDBY)
                .await?;
        }
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Error<I>> {
        let value = self.read_register(Register::PowerCtl).await?;
        if value & POWER_CTL_STANDBY == 0 {
            self.write_register(Register::PowerCtl, value | POWER_CTL_STANDBY)
                .await?;
        }
        Ok(())
    }

    pub async fn is_running(&mut self) -> Result<bool, Error<I>> {
        let value = self.read_register(Register::PowerCtl).await?;
        Ok(value & POWER_CTL_STANDBY == 0)
    }

    pub async fn status(&mut self) -> Result<Status, Error<I>> {
        self.read_register(Register::Status).await.map(Status::from)
    }

    pub async fn data_ready(&mut self) -> Result<bool, Error<I>> {
        Ok(self.status().await?.data_ready())
    }

    pub async fn temperature(&mut self) -> Result<Temperature, Error<I>> {
        let mut data = [0; TEMP_LEN];
        self.read_registers(Register::Temp2, &mut data).await?;
        Ok(Temperature::from_bytes(data))
    }

    pub async fn accel(&mut self) -> Result<Accel, Error<I>> {
        let mut data = [0; AXIS_LEN];
        self.read_registers(Register::XData3, &mut data).await?;
        Ok(Accel::from_bytes(data))
    }

    pub async fn scaled_accel(&mut self, offsets: &Offsets) -> Result<AccelF64, Error<I>> {
        let range = self.range;
        Ok(self.accel().await?.scaled(range, offsets))
    }
}
