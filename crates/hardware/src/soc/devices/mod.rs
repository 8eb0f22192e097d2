//! Memory-Mapped IO Devices.
//!
//! This module contains the test registers of the copperv harness: the
//! result register, the character output register and the cycle counter.

/// Simulation output register (one character per store).
pub mod sim_out;

/// Test result register (pass/fail sentinel).
pub mod test_result;

/// Timer counter register (elapsed cycles).
pub mod timer_counter;

pub use sim_out::SimOut;
pub use test_result::{TestOutcome, TestResult};
pub use timer_counter::TimerCounter;

pub use crate::soc::traits::Device;
