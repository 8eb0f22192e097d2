//! Simulation driver and RV32I behavioural model for the copperv core.
//!
//! This crate provides everything the `sim_main` and `sim_bench` executables need:
//! 1. **Driver:** Simulation context, the `Model` trait, and the evaluate-until-finish loop.
//! 2. **Core:** An RV32I instruction-level model of the copperv core.
//! 3. **ISA:** Decoding, encoding and disassembly for the RV32I base set.
//! 4. **SoC:** Bus interconnect, RAM, and the memory-mapped test registers.
//! 5. **Simulation:** Program loading, bare-metal test programs, expectations and statistics.

/// Common types and constants (traps, host errors, register file).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Processor core (RV32I execution).
pub mod core;
/// Instruction set (decode, encode, disassembly, ABI, RV32I opcodes).
pub mod isa;
/// Driver loop, context, model, loader and test programs.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// RV32I core; holds registers, pc, the system bus and stats.
pub use crate::core::Cpu;
/// Driver that owns a context and a model and runs the evaluation loop.
pub use crate::sim::driver::{Driver, DriverVariant, RunReport};
/// Per-step evaluation interface implemented by every design under test.
pub use crate::sim::model::Model;
/// Simulation context: arguments, completion flag and time.
pub use crate::sim::context::SimContext;
/// The copperv model evaluated by the executables.
pub use crate::sim::simulator::Simulator;
/// Top-level system (bus and test-register handles); construct with `System::new`.
pub use crate::soc::System;
