#![cfg(feature = "daemon")]

mod common;

use adxl355::{
    accel::GRAVITY,
    cancel::CancelToken,
    collector::{Collector, CollectorState},
    config::SamplingConfig,
    error::{Error, ErrorKind},
    store::MEASUREMENT,
    supervisor::Supervisor,
};
use common::{
    CancelAfter, CountingDelay, FakeAdxl355, RecordingStore, FILTER, PART_ID, POWER_CTL, RANGE,
};

fn collector(
    device: &FakeAdxl355,
    config: &SamplingConfig,
    cancel: &CancelToken,
    ticks: u32,
) -> Collector<FakeAdxl355, RecordingStore, CancelAfter> {
    Collector::new(
        device.clone(),
        RecordingStore::default(),
        CancelAfter::new(cancel, ticks),
        config,
    )
}

#[test]
fn test_run_until_cancelled() {
    let device = FakeAdxl355::new();
    device.set_axes(128000, -128000, 0);
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &SamplingConfig::default(), &cancel, 3);

    collector.run(&cancel).unwrap();

    assert_eq!(collector.state(), CollectorState::Idle);
    let points = &collector.store().points;
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].measurement, MEASUREMENT);
    assert_eq!(points[0].fields[0].0, "x-axis");
    assert!((points[0].fields[0].1 - GRAVITY).abs() < 1e-9);
    assert!((points[0].fields[1].1 + GRAVITY).abs() < 1e-9);
    assert_eq!(points[0].fields[2], ("z-axis", 0.0));

    let registers = device.registers();
    // ±4g, upper range bits untouched
    assert_eq!(registers.regs[RANGE as usize], 0x82);
    assert_eq!(registers.regs[FILTER as usize], 0x06);
    assert!(registers.standby());
}

#[test]
fn test_offsets_applied() {
    let device = FakeAdxl355::new();
    device.set_axes(0, 0, 64000);
    let config = SamplingConfig::from_json(
        r#"{"range_setting": 3, "x_offset": 0.1, "y_offset": -0.2, "z_offset": 0.3}"#,
    )
    .unwrap();
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &config, &cancel, 1);

    collector.setup().unwrap();
    let accel = collector.tick().unwrap();

    assert!((accel.x() - 0.1).abs() < 1e-9);
    assert!((accel.y() + 0.2).abs() < 1e-9);
    assert!((accel.z() - (GRAVITY + 0.3)).abs() < 1e-9);
    assert!(!device.registers().standby());
}

#[test]
fn test_bus_fault_mid_loop_leaves_device_in_standby() {
    let device = FakeAdxl355::new().with_failing_axis_reads([5]);
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &SamplingConfig::default(), &cancel, 100);

    let err = collector.run(&cancel).unwrap_err();

    assert!(matches!(err, Error::WriteReadError(_)));
    assert_eq!(err.kind(), ErrorKind::BusFault);
    assert_eq!(collector.state(), CollectorState::Faulted);
    assert_eq!(collector.store().points.len(), 4);
    assert!(!cancel.is_cancelled());

    let registers = device.registers();
    assert!(registers.standby());
    // one write to leave standby, one to re-enter it
    assert_eq!(registers.writes_to(POWER_CTL), 2);
}

#[test]
fn test_invalid_range_is_fatal_and_writes_nothing() {
    let device = FakeAdxl355::new();
    let config = SamplingConfig::from_json(r#"{"range_setting": 0}"#).unwrap();
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &config, &cancel, 100);
    let mut supervisor = Supervisor::new(CountingDelay::default());

    let err = supervisor.supervise(&mut collector, &cancel).unwrap_err();

    assert!(matches!(err, Error::InvalidRange(0)));
    assert_eq!(supervisor.restarts(), 0);
    assert_eq!(collector.state(), CollectorState::Idle);
    assert!(collector.store().points.is_empty());

    let registers = device.registers();
    assert_eq!(registers.writes_to(RANGE), 0);
    assert_eq!(registers.writes_to(FILTER), 0);
    assert!(registers.standby());
}

#[test]
fn test_invalid_filter_keeps_range_write_but_stops() {
    let device = FakeAdxl355::new();
    let config = SamplingConfig::from_json(r#"{"lowpass_filter": 12}"#).unwrap();
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &config, &cancel, 100);

    let err = collector.run(&cancel).unwrap_err();

    assert!(matches!(err, Error::InvalidLowpassFilter(12)));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let registers = device.registers();
    assert_eq!(registers.writes_to(RANGE), 1);
    assert_eq!(registers.writes_to(FILTER), 0);
    assert_eq!(registers.writes_to(POWER_CTL), 0);
    assert!(registers.standby());
}

#[test]
fn test_store_failure_does_not_end_the_loop() {
    let device = FakeAdxl355::new();
    let cancel = CancelToken::new();
    let mut collector = Collector::new(
        device.clone(),
        RecordingStore {
            failing: true,
            ..Default::default()
        },
        CancelAfter::new(&cancel, 5),
        &SamplingConfig::default(),
    );

    collector.run(&cancel).unwrap();

    assert_eq!(collector.store().attempts, 5);
    assert!(collector.store().points.is_empty());
    assert_eq!(collector.state(), CollectorState::Idle);
    assert!(device.registers().standby());
}

#[test]
fn test_supervisor_restarts_after_bus_faults() {
    // the first tick of each of the first three runs fails
    let device = FakeAdxl355::new().with_failing_axis_reads([1, 2, 3]);
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &SamplingConfig::default(), &cancel, 10);
    let mut supervisor = Supervisor::new(CountingDelay::default());

    supervisor.supervise(&mut collector, &cancel).unwrap();

    assert_eq!(supervisor.restarts(), 3);
    assert_eq!(collector.state(), CollectorState::Idle);
    assert_eq!(collector.store().points.len(), 10);

    let registers = device.registers();
    assert_eq!(registers.axis_reads, 13);
    assert!(registers.standby());
    // four runs, each leaving and re-entering standby
    assert_eq!(registers.writes_to(POWER_CTL), 8);
}

#[test]
fn test_wrong_part_id_is_fatal() {
    let device = FakeAdxl355::new();
    device.set_register(PART_ID, 0x68);
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &SamplingConfig::default(), &cancel, 100);
    let mut supervisor = Supervisor::new(CountingDelay::default());

    let err = supervisor.supervise(&mut collector, &cancel).unwrap_err();

    assert!(matches!(err, Error::WrongDevice(0x68)));
    assert_eq!(err.kind(), ErrorKind::WrongDevice);
    assert_eq!(supervisor.restarts(), 0);
    let registers = device.registers();
    assert_eq!(registers.writes_to(RANGE), 0);
    assert_eq!(registers.writes_to(POWER_CTL), 0);
}

#[test]
fn test_bus_fault_during_setup_is_not_faulted() {
    let device = FakeAdxl355::new();
    // nothing answers at the alternate address
    let config = SamplingConfig::from_json(r#"{"device_address": 83}"#).unwrap();
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &config, &cancel, 100);

    let err = collector.run(&cancel).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BusFault);
    assert_eq!(collector.state(), CollectorState::Idle);
    assert!(device.registers().writes.is_empty());
}

#[test]
fn test_long_interval_is_slept_in_steps() {
    let device = FakeAdxl355::new();
    let config = SamplingConfig::from_json(r#"{"sample_interval": 2.5}"#).unwrap();
    let cancel = CancelToken::new();
    // 1 s, 1 s and 0.5 s for the first interval
    let mut collector = collector(&device, &config, &cancel, 3);

    collector.run(&cancel).unwrap();

    assert_eq!(collector.store().points.len(), 1);
    assert!(device.registers().standby());
}

#[test]
fn test_cancel_interrupts_interval() {
    let device = FakeAdxl355::new();
    let config = SamplingConfig::from_json(r#"{"sample_interval": 3600}"#).unwrap();
    let cancel = CancelToken::new();
    let mut collector = collector(&device, &config, &cancel, 1);

    collector.run(&cancel).unwrap();

    assert_eq!(collector.store().points.len(), 1);
    assert_eq!(collector.state(), CollectorState::Idle);
}
