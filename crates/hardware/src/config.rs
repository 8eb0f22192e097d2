//! Configuration system for the copperv simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the model. It provides:
//! 1. **Defaults:** Baseline memory map, reset and step-limit constants.
//! 2. **Structures:** Hierarchical config for general, system and harness settings.
//! 3. **Plusarg Overrides:** `+config=`, `+max_cycles=`, `+trace` and `+ram_fill=`.
//!
//! Configuration is supplied as JSON (`+config=<path>` or the Python API), or
//! `Config::default()` is used.

use std::path::Path;

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::{SimError, parse_u64};
use crate::sim::context::SimContext;

/// Default configuration constants for the simulator.
///
/// These values define the baseline configuration when not explicitly
/// overridden in a JSON configuration file.
mod defaults {
    use crate::common::constants;

    /// Base address of RAM.
    pub const RAM_BASE: u32 = constants::RAM_BASE;

    /// Size of RAM (64 KiB).
    pub const RAM_SIZE: usize = constants::RAM_SIZE;

    /// Step limit. Reaching it ends the run with an error, like a testbench timeout.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Number of evaluations reset is held for before the first fetch.
    pub const RESET_CYCLES: u64 = 2;

    /// System bus width in bytes (32-bit bus).
    pub const BUS_WIDTH: u32 = 4;

    /// System bus access latency in cycles.
    pub const BUS_LATENCY: u64 = 1;
}

/// Root configuration structure containing all simulator settings.
///
/// Every section and every field is optional in JSON; missing entries take
/// their default values.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use copperv_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.trace_instructions, false);
/// assert_eq!(config.system.ram_size, 64 * 1024);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use copperv_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 5000, "echo_output": false },
///     "system": { "ram_fill": 165 },
///     "harness": { "pass_value": 1 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.system.ram_fill, 0xA5);
/// assert_eq!(config.harness.pass_value, 1);
/// assert_eq!(config.harness.fail_value, 0x0200_0001);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map and bus parameters
    #[serde(default)]
    pub system: SystemConfig,
    /// Test-register sentinel values
    #[serde(default)]
    pub harness: HarnessConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the JSON is malformed or a field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Builds the configuration for a run from the context's plusargs.
    ///
    /// Starts from `+config=<path>` when present (defaults otherwise), then
    /// applies the individual plusarg overrides.
    ///
    /// # Errors
    ///
    /// Fails if `+config=` cannot be loaded or an override does not parse.
    pub fn from_context(ctx: &SimContext) -> Result<Self, SimError> {
        let mut config = match ctx.plusarg_value("config") {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_plusargs(ctx)?;
        Ok(config)
    }

    /// Applies `+max_cycles=`, `+ram_fill=` and `+trace` on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidPlusarg`] for a value that is not a number,
    /// or a `+ram_fill=` that does not fit in a byte.
    pub fn apply_plusargs(&mut self, ctx: &SimContext) -> Result<(), SimError> {
        if let Some(value) = ctx.plusarg_value("max_cycles") {
            self.general.max_cycles = parse_plusarg("max_cycles", value)?;
        }
        if let Some(value) = ctx.plusarg_value("ram_fill") {
            let fill = parse_plusarg("ram_fill", value)?;
            self.system.ram_fill =
                u8::try_from(fill).map_err(|_| invalid_plusarg("ram_fill", value))?;
        }
        if ctx.has_flag("trace") {
            self.general.trace_instructions = true;
        }
        Ok(())
    }
}

fn invalid_plusarg(name: &str, value: &str) -> SimError {
    SimError::InvalidPlusarg {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_plusarg(name: &str, value: &str) -> Result<u64, SimError> {
    parse_u64(value).ok_or_else(|| invalid_plusarg(name, value))
}

/// General simulation settings and options.
///
/// Contains run-level configuration such as tracing, the initial program
/// counter, the step limit and reset length.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event per retired instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC for raw binaries (ELF images use their entry point)
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Initial stack pointer. Defaults to the top of RAM if not set.
    #[serde(default)]
    pub initial_sp: Option<u32>,

    /// Step limit; the run ends with an error when it is reached
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Evaluations spent in reset before the first instruction
    #[serde(default = "GeneralConfig::default_reset_cycles")]
    pub reset_cycles: u64,

    /// Copy `SIM_OUT` characters to stdout as they are written
    #[serde(default = "GeneralConfig::default_echo_output")]
    pub echo_output: bool,

    /// Record every data bus transaction for later inspection
    #[serde(default)]
    pub record_transactions: bool,

    /// Print the statistics report to stdout when the core halts
    #[serde(default = "GeneralConfig::default_print_stats")]
    pub print_stats: bool,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    fn default_start_pc() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default step limit.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Returns the default reset length.
    fn default_reset_cycles() -> u64 {
        defaults::RESET_CYCLES
    }

    fn default_echo_output() -> bool {
        true
    }

    fn default_print_stats() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::RAM_BASE,
            initial_sp: None,
            max_cycles: defaults::MAX_CYCLES,
            reset_cycles: defaults::RESET_CYCLES,
            echo_output: true,
            record_transactions: false,
            print_stats: true,
        }
    }
}

/// Memory map and bus configuration.
///
/// Defines RAM placement, the test-register addresses and the system bus
/// parameters used for transit-time accounting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// RAM base address
    #[serde(default = "SystemConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes
    #[serde(default = "SystemConfig::default_ram_size")]
    pub ram_size: usize,

    /// Byte RAM is filled with before the program is loaded
    #[serde(default)]
    pub ram_fill: u8,

    /// Test result register address
    #[serde(default = "SystemConfig::default_test_result_addr")]
    pub test_result_addr: u32,

    /// Simulation output register address
    #[serde(default = "SystemConfig::default_sim_out_addr")]
    pub sim_out_addr: u32,

    /// Timer counter register address
    #[serde(default = "SystemConfig::default_timer_counter_addr")]
    pub timer_counter_addr: u32,

    /// System bus width in bytes
    #[serde(default = "SystemConfig::default_bus_width")]
    pub bus_width: u32,

    /// System bus latency in cycles
    #[serde(default = "SystemConfig::default_bus_latency")]
    pub bus_latency: u64,
}

impl SystemConfig {
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    fn default_test_result_addr() -> u32 {
        constants::TEST_RESULT_ADDR
    }

    fn default_sim_out_addr() -> u32 {
        constants::SIM_OUT_ADDR
    }

    fn default_timer_counter_addr() -> u32 {
        constants::TIMER_COUNTER_ADDR
    }

    fn default_bus_width() -> u32 {
        defaults::BUS_WIDTH
    }

    fn default_bus_latency() -> u64 {
        defaults::BUS_LATENCY
    }

    /// One past the last RAM address, as a 64-bit value so it cannot wrap.
    pub fn ram_end(&self) -> u64 {
        u64::from(self.ram_base) + self.ram_size as u64
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            ram_fill: 0,
            test_result_addr: constants::TEST_RESULT_ADDR,
            sim_out_addr: constants::SIM_OUT_ADDR,
            timer_counter_addr: constants::TIMER_COUNTER_ADDR,
            bus_width: defaults::BUS_WIDTH,
            bus_latency: defaults::BUS_LATENCY,
        }
    }
}

/// Values a test program writes to the result register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Sentinel meaning the test passed
    #[serde(default = "HarnessConfig::default_pass")]
    pub pass_value: u32,

    /// Sentinel meaning the test failed
    #[serde(default = "HarnessConfig::default_fail")]
    pub fail_value: u32,
}

impl HarnessConfig {
    fn default_pass() -> u32 {
        constants::T_PASS
    }

    fn default_fail() -> u32 {
        constants::T_FAIL
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            pass_value: constants::T_PASS,
            fail_value: constants::T_FAIL,
        }
    }
}
