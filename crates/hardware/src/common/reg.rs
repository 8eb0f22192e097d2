//! RV32I Integer Register File.
//!
//! This module provides the `RegisterFile` struct holding the 32 architectural
//! integer registers of the copperv core. It provides:
//! 1. **Storage:** 32 registers of 32 bits each (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero.
//! 3. **Observability:** Debugging utilities for dumping register state.

use std::fmt;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Integer register file. Register `x0` reads as zero and ignores writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx & 0x1F] }
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx & 0x1F] = val;
        }
    }

    /// Returns a snapshot of all registers, `x0` included.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps the register file at `debug` level, two registers per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            tracing::debug!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1)
            );
        }
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_REGS).step_by(4) {
            writeln!(
                f,
                "x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1),
                i + 2,
                self.read(i + 2),
                i + 3,
                self.read(i + 3)
            )?;
        }
        Ok(())
    }
}
