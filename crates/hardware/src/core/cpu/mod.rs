//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state of the copperv core. It coordinates the following:
//! 1. **State Management:** Maintains the integer registers and the program counter.
//! 2. **System Integration:** Owns the system bus with RAM and the test registers.
//! 3. **Observability:** Instruction tracing and performance statistics.

/// Instruction fetch, decode and execute.
pub mod execution;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::isa::abi;
use crate::soc::System;
use crate::stats::SimStats;

pub use self::execution::StepOutcome;

/// Main CPU structure containing all processor state.
///
/// The copperv model executes one instruction per active clock cycle, so the
/// architectural state is all there is: no pipeline latches are modelled.
#[derive(Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u32,
    /// System Bus and Devices.
    pub bus: System,
    /// Enable instruction tracing.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a new CPU instance with the specified system and configuration.
    ///
    /// The program counter starts at `general.start_pc` and the stack pointer
    /// at `general.initial_sp`, or at the top of RAM when that is not set.
    ///
    /// # Arguments
    ///
    /// * `system` - The system containing the bus and devices.
    /// * `config` - The simulator configuration parameters.
    pub fn new(system: System, config: &Config) -> Self {
        let sp = config
            .general
            .initial_sp
            .unwrap_or_else(|| config.system.ram_end() as u32);
        let mut regs = RegisterFile::new();
        regs.write(abi::REG_SP, sp);

        Self {
            regs,
            pc: config.general.start_pc,
            bus: system,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Dumps the current CPU state (PC and registers) at `debug` level.
    pub fn dump_state(&self) {
        tracing::debug!("PC = {:#010x}", self.pc);
        self.regs.dump();
    }
}
