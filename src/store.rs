//! Time-series store the collector publishes to.

use crate::{accel::AccelF64, config::SamplingConfig, line_protocol};
use std::time::Duration;

/// Measurement name of every published sample.
pub const MEASUREMENT: &str = "adxl355_measure";

/// One point: a measurement name and its numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub measurement: &'static str,
    pub fields: Vec<(&'static str, f64)>,
}

impl DataPoint {
    pub fn acceleration(accel: &AccelF64) -> Self {
        Self {
            measurement: MEASUREMENT,
            fields: vec![
                ("x-axis", accel.x()),
                ("y-axis", accel.y()),
                ("z-axis", accel.z()),
            ],
        }
    }
}

/// A sink for data points. Failures are expected to be transient.
pub trait Store {
    type Error: std::fmt::Display;

    fn write(&mut self, points: &[DataPoint]) -> Result<(), Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("influxdb returned status {0}")]
    Status(u16),

    #[error("influxdb request failed: {0}")]
    Transport(#[from] Box<ureq::Transport>),
}

/// InfluxDB 1.x client posting line protocol to `/write`.
pub struct InfluxStore {
    agent: ureq::Agent,
    url: String,
    database: String,
    user: String,
    password: String,
}

impl InfluxStore {
    pub const TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(Self::TIMEOUT).build(),
            url: format!("http://{host}:{port}/write"),
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(
            &config.influxdb_host,
            config.influxdb_port,
            &config.influxdb_user,
            &config.influxdb_password,
            &config.influxdb_database,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Store for InfluxStore {
    type Error = StoreError;

    fn write(&mut self, points: &[DataPoint]) -> Result<(), StoreError> {
        let body = line_protocol::encode(points);
        if body.is_empty() {
            return Ok(());
        }
        let mut request = self.agent.post(&self.url).query("db", &self.database);
        if !self.user.is_empty() {
            request = request.query("u", &self.user).query("p", &self.password);
        }
        match request.send_string(&body) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(StoreError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                Err(StoreError::Transport(Box::new(transport)))
            }
        }
    }
}
