//! ADXL355 polling daemon
//!
//! Samples the accelerometer over Linux i2c-dev and writes every sample to
//! InfluxDB. Bus faults, including a bus device that cannot be opened,
//! restart the sensor after a backoff; configuration errors end the process.
//!
//! Usage: `adxl355d [config.json]`

use adxl355::{
    cancel::CancelToken,
    collector::Collector,
    config::SamplingConfig,
    session::Session,
    store::InfluxStore,
    supervisor::Supervisor,
};
use linux_embedded_hal::{Delay, I2cdev};
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SamplingConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => SamplingConfig::default(),
    };

    let cancel = CancelToken::new();
    let handler = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler.cancel()) {
        error!("cannot install signal handler: {e}");
        return ExitCode::FAILURE;
    }

    let bus_path = config.bus_path();
    let mut session = Session::new(|| {
        I2cdev::new(&bus_path).map(|i2c| {
            info!("ADXL355 at {bus_path} address {:#04x}", config.device_address);
            Collector::new(i2c, InfluxStore::from_config(&config), Delay, &config)
        })
    });
    let mut supervisor = Supervisor::new(Delay);
    match supervisor.supervise(&mut session, &cancel) {
        Ok(()) => {
            info!("stopped by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("fatal sensor error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
