//! Restart policy around the collector.
//!
//! A bus fault, or a bus that cannot be opened (see [`crate::session`]), ends
//! the run; the supervisor waits a fixed backoff and runs again, without
//! limit. Any other error ends supervision immediately, since a bad
//! configuration fails the same way on every attempt.

use crate::{
    cancel::CancelToken,
    collector::Collector,
    error::{self, ErrorKind},
    store::Store,
};
use embedded_hal::{delay::DelayNs, i2c::I2c};
use log::{info, warn};
use std::{fmt::Debug, time::Duration};

pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);

/// The backoff is slept in slices of this length so that cancellation is
/// noticed while waiting.
const BACKOFF_SLICE_MS: u32 = 100;

/// Errors that know whether another attempt can succeed.
pub trait Fault: Debug {
    fn is_retryable(&self) -> bool;
}

impl<I: I2c> Fault for error::Error<I> {
    fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::BusFault
    }
}

/// A task the supervisor can (re)start.
pub trait Supervised {
    type Error: Fault;

    /// Run until cancelled (`Ok`) or failed.
    fn run(&mut self, cancel: &CancelToken) -> Result<(), Self::Error>;
}

impl<I, S, D> Supervised for Collector<I, S, D>
where
    I: I2c,
    S: Store,
    D: DelayNs,
{
    type Error = error::Error<I>;

    fn run(&mut self, cancel: &CancelToken) -> Result<(), Self::Error> {
        Collector::run(self, cancel)
    }
}

pub struct Supervisor<D> {
    delay: D,
    backoff: Duration,
    restarts: u32,
}

impl<D> Supervisor<D>
where
    D: DelayNs,
{
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            backoff: DEFAULT_BACKOFF,
            restarts: 0,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Number of restarts so far.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Run `task` until it is cancelled or fails with a non-retryable error.
    pub fn supervise<T>(&mut self, task: &mut T, cancel: &CancelToken) -> Result<(), T::Error>
    where
        T: Supervised,
    {
        loop {
            match task.run(cancel) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() => {
                    if cancel.is_cancelled() {
                        info!("cancelled after fault: {e:?}");
                        return Ok(());
                    }
                    warn!("run failed: {e:?}, restarting in {:?}", self.backoff);
                    if self.wait(cancel) {
                        return Ok(());
                    }
                    self.restarts += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Sleep for the backoff. Returns `true` if cancelled meanwhile.
    fn wait(&mut self, cancel: &CancelToken) -> bool {
        let mut remaining = self.backoff.as_millis().min(u32::MAX as u128) as u32;
        while remaining > 0 {
            if cancel.is_cancelled() {
                return true;
            }
            let slice = remaining.min(BACKOFF_SLICE_MS);
            self.delay.delay_ms(slice);
            remaining -= slice;
        }
        cancel.is_cancelled()
    }
}
