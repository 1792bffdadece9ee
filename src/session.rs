//! Collector whose bus is opened inside the supervised run.
//!
//! An i2c-dev node may not exist yet when the daemon starts, and a USB
//! adapter may vanish while it runs. [`Session`] builds its collector with a
//! `connect` closure on first use and again after every bus fault, so both
//! cases are retried by the [`Supervisor`](crate::supervisor::Supervisor)
//! like any other bus fault.

use crate::{
    cancel::CancelToken,
    collector::Collector,
    error::{Error, ErrorKind},
    store::Store,
    supervisor::{Fault, Supervised},
};
use embedded_hal::{delay::DelayNs, i2c::I2c};
use std::fmt::{Debug, Formatter};

pub enum SessionError<E, I>
where
    I: I2c,
{
    /// The bus could not be opened
    Connect(E),
    Sensor(Error<I>),
}

impl<E, I> Debug for SessionError<E, I>
where
    E: Debug,
    I: I2c,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(e) => f.debug_tuple("Connect").field(e).finish(),
            Self::Sensor(e) => f.debug_tuple("Sensor").field(e).finish(),
        }
    }
}

impl<E, I> Fault for SessionError<E, I>
where
    E: Debug,
    I: I2c,
{
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) => true,
            Self::Sensor(e) => e.kind() == ErrorKind::BusFault,
        }
    }
}

pub struct Session<F, C> {
    connect: F,
    collector: Option<C>,
    connects: u32,
}

impl<F, C, E> Session<F, C>
where
    F: FnMut() -> Result<C, E>,
{
    pub fn new(connect: F) -> Self {
        Self {
            connect,
            collector: None,
            connects: 0,
        }
    }
}

impl<F, C> Session<F, C> {
    /// The current collector, if the bus is open.
    pub fn collector(&self) -> Option<&C> {
        self.collector.as_ref()
    }

    /// Number of successful connects so far.
    pub fn connects(&self) -> u32 {
        self.connects
    }
}

impl<F, E, I, S, D> Supervised for Session<F, Collector<I, S, D>>
where
    F: FnMut() -> Result<Collector<I, S, D>, E>,
    E: Debug,
    I: I2c,
    S: Store,
    D: DelayNs,
{
    type Error = SessionError<E, I>;

    fn run(&mut self, cancel: &CancelToken) -> Result<(), Self::Error> {
        let collector = match self.collector.take() {
            Some(collector) => collector,
            None => {
                let collector = (self.connect)().map_err(SessionError::Connect)?;
                self.connects += 1;
                collector
            }
        };
        let collector = self.collector.insert(collector);
        let result = collector.run(cancel);
        if let Err(e) = &result {
            if e.kind() == ErrorKind::BusFault {
                // reopen the bus on the next run
                self.collector = None;
            }
        }
        result.map_err(SessionError::Sensor)
    }
}
