//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the copperv system from configuration. It performs:
//! 1. **Bus setup:** Creates the interconnect with configured width and latency.
//! 2. **Device registration:** Instantiates RAM and the three test registers.
//! 3. **Shared handles:** Keeps the test result and output handles for reading back after a run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::common::error::SimError;
use crate::config::Config;
use crate::soc::devices::test_result::NOT_WRITTEN;
use crate::soc::devices::{SimOut, TestOutcome, TestResult, TimerCounter};
use crate::soc::interconnect::Bus;
use crate::soc::memory::Memory;

/// Top-level system instance containing the bus and the test-register handles.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to RAM and the test registers.
    pub bus: Bus,
    /// Last value written to `TEST_RESULT`; `u64::MAX` until the first write.
    pub test_result: Arc<AtomicU64>,
    /// Set once the fail sentinel has been written, even if later overwritten.
    pub fail_seen: Arc<AtomicBool>,
    /// Characters written to `SIM_OUT`.
    pub output: Arc<Mutex<Vec<u8>>>,
    pass_value: u32,
    fail_value: u32,
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// Creates the bus, RAM (filled with `system.ram_fill`), and the
    /// `TEST_RESULT`, `SIM_OUT` and `TIMER_COUNTER` registers.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryMap`] if RAM does not fit the address
    /// space or any two regions overlap.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let sys = &config.system;
        let mut bus = Bus::new(sys.bus_width, sys.bus_latency);
        if config.general.record_transactions {
            bus.enable_recording();
        }

        let ram_size = u32::try_from(sys.ram_size).map_err(|_| {
            SimError::InvalidMemoryMap(format!("RAM size {:#x} exceeds 4 GiB", sys.ram_size))
        })?;
        bus.add_device(Box::new(Memory::new(sys.ram_base, ram_size, sys.ram_fill)))?;

        let test_result = Arc::new(AtomicU64::new(NOT_WRITTEN));
        let fail_seen = Arc::new(AtomicBool::new(false));
        bus.add_device(Box::new(TestResult::new(
            sys.test_result_addr,
            &config.harness,
            test_result.clone(),
            fail_seen.clone(),
        )))?;

        let output = Arc::new(Mutex::new(Vec::new()));
        bus.add_device(Box::new(SimOut::new(
            sys.sim_out_addr,
            output.clone(),
            config.general.echo_output,
        )))?;

        bus.add_device(Box::new(TimerCounter::new(sys.timer_counter_addr)))?;

        Ok(Self {
            bus,
            test_result,
            fail_seen,
            output,
            pass_value: config.harness.pass_value,
            fail_value: config.harness.fail_value,
        })
    }

    /// Loads a binary into memory at the given physical address.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) {
        self.bus.load_binary_at(data, addr);
    }

    /// Advances all devices to the given cycle count.
    pub fn tick(&mut self, cycle: u64) {
        self.bus.tick(cycle);
    }

    /// Returns the last value written to `TEST_RESULT`, if any.
    pub fn test_result(&self) -> Option<u32> {
        let val = self.test_result.load(Ordering::Relaxed);
        if val != NOT_WRITTEN { Some(val as u32) } else { None }
    }

    /// Classifies the current `TEST_RESULT` value.
    pub fn outcome(&self) -> TestOutcome {
        TestOutcome::classify(
            self.test_result.load(Ordering::Relaxed),
            self.pass_value,
            self.fail_value,
        )
    }

    /// Returns whether a fail sentinel was ever written.
    pub fn fail_seen(&self) -> bool {
        self.fail_seen.load(Ordering::Relaxed)
    }

    /// Returns the characters written to `SIM_OUT` so far, lossily decoded as UTF-8.
    pub fn sim_output(&self) -> String {
        let bytes = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
