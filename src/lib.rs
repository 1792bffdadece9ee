#![cfg_attr(not(feature = "std"), no_std)]

pub mod accel;
pub mod address;
pub mod error;
pub mod error_async;
pub mod filter;
pub mod range;
pub mod registers;
pub mod sensor;
pub mod sensor_async;
pub mod status;
pub mod temperature;

#[cfg(feature = "daemon")]
pub mod cancel;
#[cfg(feature = "daemon")]
pub mod collector;
#[cfg(feature = "daemon")]
pub mod config;
#[cfg(feature = "daemon")]
pub mod line_protocol;
#[cfg(feature = "daemon")]
pub mod session;
#[cfg(feature = "daemon")]
pub mod store;
#[cfg(feature = "daemon")]
pub mod supervisor;
