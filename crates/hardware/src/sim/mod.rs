//! Simulation driver and harness.
//!
//! The driver side (`context`, `model`, `driver`) is independent of the core:
//! it evaluates any [`model::Model`] until the context reports completion. The
//! harness side (`simulator`, `loader`, `programs`, `expect`) is the copperv
//! model itself, the programs it runs, and the checks applied after a run.

/// Simulation context: arguments, plusargs, completion flag and time.
pub mod context;
/// Evaluate-until-finish loop and the `sim_main`/`sim_bench` entry point.
pub mod driver;
/// Register and bus transaction expectations.
pub mod expect;
/// Raw and ELF32 program loading.
pub mod loader;
/// The per-step evaluation interface.
pub mod model;
/// Bare-metal test programs.
pub mod programs;
/// The copperv model.
pub mod simulator;
