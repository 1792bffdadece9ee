//! Sampling loop: configure the sensor, then read, scale and publish one
//! sample per interval until cancelled or the bus fails.

use crate::{
    accel::{AccelF64, Offsets},
    cancel::CancelToken,
    config::SamplingConfig,
    error::Error,
    sensor::Adxl355,
    store::{DataPoint, Store},
};
use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{debug, error, info, warn};
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Configuring,
    Sampling,
    Stopping,
    /// The last run ended on a bus fault while sampling
    Faulted,
}

/// Longest single call into the delay; the sample interval is slept in steps
/// of at most this length and cancellation is checked between them.
const DELAY_STEP: Duration = Duration::from_secs(1);

pub struct Collector<I, S, D>
where
    I: I2c,
{
    sensor: Adxl355<I>,
    store: S,
    delay: D,
    range_code: u8,
    filter_code: u8,
    offsets: Offsets,
    interval: Duration,
    state: CollectorState,
}

impl<I, S, D> Collector<I, S, D>
where
    I: I2c,
    S: Store,
    D: DelayNs,
{
    pub fn new(i2c: I, store: S, delay: D, config: &SamplingConfig) -> Self {
        Self {
            sensor: Adxl355::new(i2c, config.address()),
            store,
            delay,
            range_code: config.range_setting,
            filter_code: config.lowpass_filter,
            offsets: config.offsets(),
            interval: config.sample_interval(),
            state: CollectorState::Idle,
        }
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the bus, consuming the collector.
    pub fn release(self) -> I {
        self.sensor.release()
    }

    /// Check the part id, apply range and filter, then leave standby.
    pub fn setup(&mut self) -> Result<(), Error<I>> {
        self.sensor.verify_device()?;
        self.sensor.set_range_code(self.range_code)?;
        self.sensor.set_lowpass_filter_code(self.filter_code)?;
        self.sensor.start()?;
        info!(
            "sensor configured: range {:?}, filter code {}",
            self.sensor.cached_range(),
            self.filter_code
        );
        Ok(())
    }

    /// Read one scaled sample and publish it.
    ///
    /// A store failure loses the sample but is not an error of the tick.
    pub fn tick(&mut self) -> Result<AccelF64, Error<I>> {
        let accel = self.sensor.scaled_accel(&self.offsets)?;
        match self.store.write(&[DataPoint::acceleration(&accel)]) {
            Ok(()) => debug!(
                "data sent: x={:.6}, y={:.6}, z={:.6}",
                accel.x(),
                accel.y(),
                accel.z()
            ),
            Err(e) => error!("error writing to store: {e}"),
        }
        Ok(accel)
    }

    fn sample_until(&mut self, cancel: &CancelToken) -> Result<(), Error<I>> {
        while !cancel.is_cancelled() {
            self.tick()?;
            self.pause(cancel);
        }
        Ok(())
    }

    fn pause(&mut self, cancel: &CancelToken) {
        let mut remaining = self.interval;
        loop {
            let step = remaining.min(DELAY_STEP);
            self.delay.delay_us(step.as_micros() as u32);
            remaining -= step;
            if remaining.is_zero() || cancel.is_cancelled() {
                break;
            }
        }
    }

    /// Configure the sensor and sample until `cancel` is set.
    ///
    /// Returns `Ok(())` on cancellation. The sensor is put back into standby
    /// before returning, whichever way the run ends.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<(), Error<I>> {
        self.state = CollectorState::Configuring;
        let mut sampling_fault = false;
        let result = match self.setup() {
            Ok(()) => {
                self.state = CollectorState::Sampling;
                info!("starting data collection loop");
                let sampled = self.sample_until(cancel);
                sampling_fault = sampled.is_err();
                sampled
            }
            Err(e) => Err(e),
        };
        if result.is_ok() {
            info!("data collection stopped");
        }

        self.state = CollectorState::Stopping;
        let stopped = self.sensor.stop();
        let result = match (result, stopped) {
            (Ok(()), stopped) => stopped,
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(stop_error)) => {
                warn!("could not put sensor into standby: {stop_error:?}");
                Err(e)
            }
        };

        // tick only fails on the bus
        self.state = if sampling_fault {
            CollectorState::Faulted
        } else {
            CollectorState::Idle
        };
        if result.is_ok() {
            info!("sensor stopped");
        }
        result
    }
}
