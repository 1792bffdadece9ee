#![allow(dead_code)]

use adxl355::{
    cancel::CancelToken,
    store::{DataPoint, Store},
};
use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation},
};
use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

pub const ADDR: u8 = 0x1D;
pub const PART_ID: u8 = 0x02;
pub const XDATA3: u8 = 0x08;
pub const FILTER: u8 = 0x28;
pub const RANGE: u8 = 0x2C;
pub const POWER_CTL: u8 = 0x2D;

#[derive(Debug)]
pub struct Registers {
    pub regs: [u8; 0x30],
    pointer: usize,
    /// Number of block reads starting at XDATA3
    pub axis_reads: u32,
    /// Axis reads (1-based) that fail with a bus error
    pub failing_axis_reads: BTreeSet<u32>,
    pub writes: Vec<(u8, u8)>,
}

impl Registers {
    pub fn writes_to(&self, reg: u8) -> usize {
        self.writes.iter().filter(|(r, _)| *r == reg).count()
    }

    pub fn standby(&self) -> bool {
        self.regs[POWER_CTL as usize] & 0x01 != 0
    }
}

/// In-memory ADXL355 register file with auto-incrementing pointer.
///
/// Clones share the same registers, so a test can keep a handle while the
/// collector owns the bus.
#[derive(Clone, Debug)]
pub struct FakeAdxl355(Rc<RefCell<Registers>>);

impl FakeAdxl355 {
    /// Power-on state: standby, ±2g, 4000 Hz.
    pub fn new() -> Self {
        let mut regs = [0u8; 0x30];
        regs[0x00] = 0xAD;
        regs[0x01] = 0x1D;
        regs[0x02] = 0xED;
        regs[RANGE as usize] = 0x81;
        regs[POWER_CTL as usize] = 0x01;
        Self(Rc::new(RefCell::new(Registers {
            regs,
            pointer: 0,
            axis_reads: 0,
            failing_axis_reads: BTreeSet::new(),
            writes: Vec::new(),
        })))
    }

    pub fn with_failing_axis_reads(self, reads: impl IntoIterator<Item = u32>) -> Self {
        self.0.borrow_mut().failing_axis_reads.extend(reads);
        self
    }

    /// Store raw 20-bit counts in the data registers.
    pub fn set_axes(&self, x: i32, y: i32, z: i32) {
        let mut state = self.0.borrow_mut();
        for (i, value) in [x, y, z].into_iter().enumerate() {
            let shifted = ((value as u32) & 0xF_FFFF) << 4;
            let base = XDATA3 as usize + 3 * i;
            state.regs[base] = (shifted >> 16) as u8;
            state.regs[base + 1] = (shifted >> 8) as u8;
            state.regs[base + 2] = shifted as u8;
        }
    }

    pub fn set_register(&self, reg: u8, value: u8) {
        self.0.borrow_mut().regs[reg as usize] = value;
    }

    pub fn registers(&self) -> std::cell::Ref<'_, Registers> {
        self.0.borrow()
    }
}

impl ErrorType for FakeAdxl355 {
    type Error = ErrorKind;
}

impl I2c for FakeAdxl355 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != ADDR {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let mut state = self.0.borrow_mut();
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    state.pointer = reg as usize;
                    for &value in data {
                        let pointer = state.pointer;
                        state.regs[pointer] = value;
                        state.writes.push((pointer as u8, value));
                        state.pointer += 1;
                    }
                }
                Operation::Read(buffer) => {
                    if state.pointer == XDATA3 as usize {
                        state.axis_reads += 1;
                        let read = state.axis_reads;
                        if state.failing_axis_reads.contains(&read) {
                            return Err(ErrorKind::Bus);
                        }
                    }
                    for byte in buffer.iter_mut() {
                        *byte = state.regs[state.pointer];
                        state.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Store that records points and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub points: Vec<DataPoint>,
    pub failing: bool,
    pub attempts: u32,
}

impl Store for RecordingStore {
    type Error = String;

    fn write(&mut self, points: &[DataPoint]) -> Result<(), String> {
        self.attempts += 1;
        if self.failing {
            return Err("connection refused".into());
        }
        self.points.extend_from_slice(points);
        Ok(())
    }
}

/// Delay that cancels the token after a number of calls.
pub struct CancelAfter {
    pub token: CancelToken,
    pub remaining: u32,
    pub calls: u32,
}

impl CancelAfter {
    pub fn new(token: &CancelToken, delays: u32) -> Self {
        Self {
            token: token.clone(),
            remaining: delays,
            calls: 0,
        }
    }
}

impl DelayNs for CancelAfter {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.token.cancel();
        }
    }
}

/// Delay that only adds up the requested time.
#[derive(Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
