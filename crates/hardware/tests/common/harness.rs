use copperv_core::Simulator;
use copperv_core::config::Config;
use copperv_core::sim::simulator::HaltReason;

use crate::common::builder::program::words_to_bytes;

/// Installs a test-friendly `tracing` subscriber once per process.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// Default configuration with console output and the stats report turned off.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.general.echo_output = false;
    config.general.print_stats = false;
    config.general.max_cycles = 10_000;
    config
}

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(quiet_config())
    }

    pub fn with_config(config: Config) -> Self {
        init_logging();
        Self {
            sim: Simulator::new(config).unwrap(),
        }
    }

    /// Loads instruction words as a raw image at the base of RAM.
    pub fn load_program(mut self, words: &[u32]) -> Self {
        let _ = self.sim.load_program(&words_to_bytes(words)).unwrap();
        self
    }

    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    pub fn run(&mut self) -> HaltReason {
        self.sim.run_to_halt()
    }
}
