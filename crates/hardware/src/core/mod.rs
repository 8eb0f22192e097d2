//! Core processor implementation.
//!
//! This module contains the RV32I model of the copperv core: the ALU and the
//! CPU that fetches, decodes and executes one instruction per clock.

/// Integer ALU and branch comparator.
pub mod alu;

/// CPU core state and execution.
pub mod cpu;

pub use self::cpu::{Cpu, StepOutcome};
