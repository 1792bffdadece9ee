//! Daemon configuration
//!
//! A flat JSON object; every key is optional:
//!
//! ```json
//! {
//!     "i2c_bus": 1,
//!     "device_address": 29,
//!     "range_setting": 2,
//!     "lowpass_filter": 6,
//!     "x_offset": 0.0,
//!     "y_offset": 0.0,
//!     "z_offset": -0.12,
//!     "influxdb_host": "192.168.1.180",
//!     "influxdb_port": 8086,
//!     "influxdb_user": "root",
//!     "influxdb_password": "",
//!     "influxdb_database": "sensor",
//!     "sample_interval": 0.08
//! }
//! ```
//!
//! Range and filter are kept as raw register codes and validated when the
//! collector configures the device.

use crate::{accel::Offsets, address::Address, filter::LowpassFilter, range::Range};
use log::warn;
use serde::Deserialize;
use std::{io, path::Path, time::Duration};

pub const DEFAULT_SAMPLE_INTERVAL: f64 = 0.08;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingConfig {
    pub i2c_bus: u32,
    pub device_address: u8,

    pub range_setting: u8,
    pub lowpass_filter: u8,

    pub x_offset: f64,
    pub y_offset: f64,
    pub z_offset: f64,

    pub influxdb_host: String,
    pub influxdb_port: u16,
    pub influxdb_user: String,
    pub influxdb_password: String,
    pub influxdb_database: String,

    /// Seconds between samples
    pub sample_interval: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            i2c_bus: 1,
            device_address: Address::default().into(),
            range_setting: Range::G4.code(),
            lowpass_filter: LowpassFilter::Hz62_5.code(),
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
            influxdb_host: "192.168.1.180".into(),
            influxdb_port: 8086,
            influxdb_user: "root".into(),
            influxdb_password: String::new(),
            influxdb_database: "sensor".into(),
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

impl SamplingConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn address(&self) -> Address {
        Address(self.device_address)
    }

    pub fn bus_path(&self) -> String {
        format!("/dev/i2c-{}", self.i2c_bus)
    }

    pub fn offsets(&self) -> Offsets {
        Offsets::new(self.x_offset, self.y_offset, self.z_offset)
    }

    /// Negative or NaN intervals read as zero, too large ones saturate.
    pub fn sample_interval(&self) -> Duration {
        if self.sample_interval.is_nan() || self.sample_interval <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.sample_interval).unwrap_or(Duration::MAX)
    }
}
