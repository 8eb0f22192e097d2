//! Test result register (`TEST_RESULT`).
//!
//! Bare-metal test programs report their verdict by storing a sentinel word
//! here: `T_PASS` (`0x0100_0001`) or `T_FAIL` (`0x0200_0001`). Writing does not
//! stop the simulation; the register simply keeps the last value written, so a
//! later `T_PASS` overwrites an earlier `T_FAIL`. That overwrite is logged as a
//! warning because it hides a failed check.
//!
//! Byte and halfword stores replace only their lanes of the current value (zero
//! if never written); each store is classified on the merged word.
//!
//! The value is shared through an `Arc<AtomicU64>` so the driver side can read
//! it back after the run. `u64::MAX` means the register was never written.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::HarnessConfig;
use crate::soc::devices::Device;

/// Raw value of the shared handle before the first write.
pub const NOT_WRITTEN: u64 = u64::MAX;

/// Verdict read from the test result register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestOutcome {
    /// No value was ever stored.
    NotWritten,
    /// The pass sentinel was the last value stored.
    Pass,
    /// The fail sentinel was the last value stored.
    Fail,
    /// Some other value was the last value stored.
    Other(u32),
}

impl TestOutcome {
    /// Classifies a raw handle value against the configured sentinels.
    pub const fn classify(raw: u64, pass_value: u32, fail_value: u32) -> Self {
        if raw == NOT_WRITTEN {
            Self::NotWritten
        } else if raw as u32 == pass_value {
            Self::Pass
        } else if raw as u32 == fail_value {
            Self::Fail
        } else {
            Self::Other(raw as u32)
        }
    }

    /// Returns `true` for [`TestOutcome::Pass`].
    pub const fn passed(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Test result register device.
#[derive(Debug)]
pub struct TestResult {
    base_addr: u32,
    pass_value: u32,
    fail_value: u32,
    value: Arc<AtomicU64>,
    fail_seen: Arc<AtomicBool>,
}

impl TestResult {
    /// Creates the register at `base_addr` publishing into `value` and `fail_seen`.
    pub fn new(
        base_addr: u32,
        harness: &HarnessConfig,
        value: Arc<AtomicU64>,
        fail_seen: Arc<AtomicBool>,
    ) -> Self {
        Self {
            base_addr,
            pass_value: harness.pass_value,
            fail_value: harness.fail_value,
            value,
            fail_seen,
        }
    }

    fn store(&self, val: u32) {
        let previous = self.value.swap(u64::from(val), Ordering::Relaxed);
        match TestOutcome::classify(u64::from(val), self.pass_value, self.fail_value) {
            TestOutcome::Pass => {
                if TestOutcome::classify(previous, self.pass_value, self.fail_value)
                    == TestOutcome::Fail
                {
                    tracing::warn!(
                        "TEST_RESULT: PASS ({val:#010x}) overwrites an earlier FAIL; the failed check is masked"
                    );
                } else {
                    tracing::info!("TEST_RESULT: PASS ({val:#010x})");
                }
            }
            TestOutcome::Fail => {
                self.fail_seen.store(true, Ordering::Relaxed);
                tracing::warn!("TEST_RESULT: FAIL ({val:#010x})");
            }
            _ => tracing::debug!("TEST_RESULT: {val:#010x}"),
        }
    }

    fn current(&self) -> u32 {
        let raw = self.value.load(Ordering::Relaxed);
        if raw == NOT_WRITTEN { 0 } else { raw as u32 }
    }

    fn store_lanes(&self, shift: u32, mask: u32, val: u32) {
        let merged = (self.current() & !(mask << shift)) | ((val & mask) << shift);
        self.store(merged);
    }
}

impl Device for TestResult {
    fn name(&self) -> &str {
        "TEST_RESULT"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 4)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        (self.current() >> ((offset & 3) * 8)) as u8
    }

    fn read_u16(&mut self, offset: u32) -> u16 {
        (self.current() >> ((offset & 2) * 8)) as u16
    }

    fn read_u32(&mut self, _offset: u32) -> u32 {
        self.current()
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.store_lanes((offset & 3) * 8, 0xFF, u32::from(val));
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.store_lanes((offset & 2) * 8, 0xFFFF, u32::from(val));
    }

    fn write_u32(&mut self, _offset: u32, val: u32) {
        self.store(val);
    }
}
