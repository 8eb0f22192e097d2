//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Memory Map:** Default RAM placement and the test-register addresses.
//! 2. **Test Sentinels:** The values bare-metal programs write to report pass or fail.
//! 3. **Instruction Constants:** Instruction size and well-known encodings.

/// Default base address of RAM. Program images are linked at zero.
pub const RAM_BASE: u32 = 0x0000_0000;

/// Default RAM size in bytes (64 KiB).
pub const RAM_SIZE: usize = 64 * 1024;

/// Test result register (`T_ADDR`). Programs write `T_PASS` or `T_FAIL` here.
pub const TEST_RESULT_ADDR: u32 = 0x8000_0000;

/// Simulation output register (`O_ADDR`). Each write emits one character.
pub const SIM_OUT_ADDR: u32 = 0x8000_0004;

/// Timer counter register (`TC_ADDR`). Reads return the elapsed cycle count.
pub const TIMER_COUNTER_ADDR: u32 = 0x8000_0008;

/// Value written to the test result register on success.
pub const T_PASS: u32 = 0x0100_0001;

/// Value written to the test result register on failure.
pub const T_FAIL: u32 = 0x0200_0001;

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical NOP (`addi x0, x0, 0`).
pub const NOP_INSTRUCTION: u32 = 0x0000_0013;

/// Number of cycles between status messages at `debug` level.
pub const STATUS_UPDATE_INTERVAL: u64 = 1_000_000;
