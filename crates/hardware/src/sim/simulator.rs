//! Simulator: the copperv model evaluated by the driver.
//!
//! One call to [`Model::eval`] is one clock. The first `general.reset_cycles`
//! clocks hold the core in reset; every later clock executes one instruction.
//! The simulator requests completion from the context when the core halts:
//!
//! * `ecall` or `ebreak`
//! * a jump or taken branch to its own address (the start-up code's `j .`)
//! * any other trap (logged as an error)
//! * `general.max_cycles` active clocks without halting (logged as an error)

use std::fmt;
use std::path::Path;

use crate::common::Trap;
use crate::common::constants::STATUS_UPDATE_INTERVAL;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::{Cpu, StepOutcome};
use crate::sim::context::SimContext;
use crate::sim::loader::{self, LoadedImage};
use crate::sim::model::Model;
use crate::soc::System;
use crate::soc::devices::TestOutcome;
use crate::stats::SimStats;

/// Why the core stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// `ecall` retired.
    Ecall,
    /// `ebreak` retired.
    Ebreak,
    /// The core jumped to its own address.
    SelfLoop {
        /// Address of the looping instruction.
        pc: u32,
    },
    /// An instruction trapped.
    Trap(Trap),
    /// The active clock limit was reached.
    CycleLimit(u64),
}

impl HaltReason {
    /// Whether this is a normal end of program rather than a fault or timeout.
    pub const fn is_clean(&self) -> bool {
        matches!(self, Self::Ecall | Self::Ebreak | Self::SelfLoop { .. })
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecall => write!(f, "ecall"),
            Self::Ebreak => write!(f, "ebreak"),
            Self::SelfLoop { pc } => write!(f, "self loop at {pc:#010x}"),
            Self::Trap(trap) => write!(f, "trap {trap}"),
            Self::CycleLimit(limit) => write!(f, "cycle limit of {limit} reached"),
        }
    }
}

/// The copperv core, its bus and devices, and the run state.
#[derive(Debug)]
pub struct Simulator {
    /// The core; owns the system bus.
    pub cpu: Cpu,
    config: Config,
    reset_remaining: u64,
    halt: Option<HaltReason>,
    image: Option<LoadedImage>,
}

impl Simulator {
    /// Builds the system and the core from `config`. No program is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryMap`] if the configured regions overlap
    /// or do not fit the address space.
    pub fn new(config: Config) -> Result<Self, SimError> {
        let system = System::new(&config)?;
        let cpu = Cpu::new(system, &config);
        Ok(Self {
            cpu,
            reset_remaining: config.general.reset_cycles,
            config,
            halt: None,
            image: None,
        })
    }

    /// Builds the simulator from the context's plusargs.
    ///
    /// Reads `+config=`, `+max_cycles=`, `+ram_fill=` and `+trace` through
    /// [`Config::from_context`], then loads `+program=` if given.
    ///
    /// # Errors
    ///
    /// Fails if the configuration or the program cannot be read, or the
    /// program does not fit in RAM.
    pub fn from_context(ctx: &SimContext) -> Result<Self, SimError> {
        Self::with_plusargs(Config::from_context(ctx)?, ctx)
    }

    /// Like [`Simulator::from_context`], starting from `config` instead of
    /// `+config=`. The other plusargs still override it.
    ///
    /// # Errors
    ///
    /// As [`Simulator::from_context`].
    pub fn from_config(mut config: Config, ctx: &SimContext) -> Result<Self, SimError> {
        config.apply_plusargs(ctx)?;
        Self::with_plusargs(config, ctx)
    }

    fn with_plusargs(config: Config, ctx: &SimContext) -> Result<Self, SimError> {
        let mut sim = Self::new(config)?;
        match ctx.plusarg_value("program") {
            Some(path) => {
                let _ = sim.load_program_file(path)?;
            }
            None => tracing::warn!("no +program= given; RAM holds only the fill pattern"),
        }
        Ok(sim)
    }

    /// Loads a raw or ELF image and points the core at its entry.
    ///
    /// # Errors
    ///
    /// See [`loader::load_image`].
    pub fn load_program(&mut self, data: &[u8]) -> Result<&LoadedImage, SimError> {
        let image = loader::load_image(&mut self.cpu.bus, data, &self.config.system)?;
        self.cpu.pc = image.entry.unwrap_or(self.config.general.start_pc);
        tracing::info!("program loaded ({:?}), start pc {:#010x}", image.kind, self.cpu.pc);
        Ok(self.image.insert(image))
    }

    /// Reads a program from disk and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Simulator::load_program`].
    pub fn load_program_file(&mut self, path: impl AsRef<Path>) -> Result<&LoadedImage, SimError> {
        let data = loader::load_binary(path.as_ref())?;
        tracing::debug!("read {} bytes from {}", data.len(), path.as_ref().display());
        self.load_program(&data)
    }

    /// Advances one clock. Returns the halt reason once the core has stopped.
    pub fn tick(&mut self) -> Option<HaltReason> {
        if self.halt.is_some() {
            return self.halt.clone();
        }

        let stats = &mut self.cpu.stats;
        stats.cycles += 1;
        if self.reset_remaining > 0 {
            self.reset_remaining -= 1;
            stats.reset_cycles += 1;
            return None;
        }

        let active = stats.cycles - stats.reset_cycles;
        if active > self.config.general.max_cycles {
            return self.halt_with(HaltReason::CycleLimit(self.config.general.max_cycles));
        }
        if active % STATUS_UPDATE_INTERVAL == 0 {
            tracing::debug!(
                "cycle {active}: pc {:#010x}, {} retired",
                self.cpu.pc,
                stats.instructions_retired
            );
        }

        self.cpu.bus.tick(active);
        let pc = self.cpu.pc;
        match self.cpu.step() {
            Ok(StepOutcome::Retired) => None,
            Ok(StepOutcome::SelfLoop) => self.halt_with(HaltReason::SelfLoop { pc }),
            Err(Trap::EnvironmentCallFromMMode) => self.halt_with(HaltReason::Ecall),
            Err(Trap::Breakpoint(_)) => self.halt_with(HaltReason::Ebreak),
            Err(trap) => self.halt_with(HaltReason::Trap(trap)),
        }
    }

    fn halt_with(&mut self, reason: HaltReason) -> Option<HaltReason> {
        if reason.is_clean() {
            tracing::info!("core halted: {reason}");
        } else {
            tracing::error!("core halted: {reason} (pc {:#010x})", self.cpu.pc);
            self.cpu.dump_state();
        }

        match self.outcome() {
            TestOutcome::Pass if self.cpu.bus.fail_seen() => {
                tracing::warn!("TEST_RESULT: PASS (a FAIL written earlier was overwritten)");
            }
            TestOutcome::Pass => tracing::info!("TEST_RESULT: PASS"),
            TestOutcome::Fail => tracing::warn!("TEST_RESULT: FAIL"),
            TestOutcome::Other(value) => tracing::warn!("TEST_RESULT: unexpected {value:#010x}"),
            TestOutcome::NotWritten => tracing::info!("TEST_RESULT: never written"),
        }

        if self.config.general.print_stats {
            self.cpu.stats.print();
        }
        self.halt = Some(reason);
        self.halt.clone()
    }

    /// Ticks until the core halts.
    pub fn run_to_halt(&mut self) -> HaltReason {
        loop {
            if let Some(reason) = self.tick() {
                return reason;
            }
        }
    }

    /// The halt reason, once halted.
    pub const fn halt_reason(&self) -> Option<&HaltReason> {
        self.halt.as_ref()
    }

    /// Whether the core has halted.
    pub const fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Verdict of the `TEST_RESULT` register.
    pub fn outcome(&self) -> TestOutcome {
        self.cpu.bus.outcome()
    }

    /// Last value written to `TEST_RESULT`.
    pub fn test_result(&self) -> Option<u32> {
        self.cpu.bus.test_result()
    }

    /// Characters written to `SIM_OUT`.
    pub fn output(&self) -> String {
        self.cpu.bus.sim_output()
    }

    /// Run statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// The configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The last program loaded, if any.
    pub const fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }
}

impl Model for Simulator {
    fn eval(&mut self, ctx: &mut SimContext) {
        if self.tick().is_some() {
            ctx.finish();
        }
        ctx.time_inc(1);
    }
}
