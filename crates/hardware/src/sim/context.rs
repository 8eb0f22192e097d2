//! Simulation context.
//!
//! One `SimContext` exists per run. It records the process arguments, exposes
//! `+name=value` plusargs to the model, and carries the completion flag and the
//! simulation time. Arguments of the form `+verilator+<option>` configure the
//! context itself:
//!
//! * `+verilator+seed+<n>` sets the random seed reported by [`SimContext::seed`]
//! * `+verilator+debug` requests debug-level logging
//! * `+verilator+quiet` requests warnings-only logging
//!
//! Any other `+verilator+` option is reported with a warning and ignored.

use crate::common::error::parse_u64;

/// Prefix of the options the context interprets itself.
const RUNTIME_PREFIX: &str = "+verilator+";

/// Process-wide configuration and completion tracking for one simulation run.
#[derive(Clone, Debug, Default)]
pub struct SimContext {
    args: Vec<String>,
    plusargs: Vec<String>,
    finished: bool,
    time: u64,
    seed: Option<u64>,
    debug: bool,
    quiet: bool,
}

impl SimContext {
    /// Creates an empty context: no arguments, not finished, time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records process arguments.
    ///
    /// Every argument is kept in order (see [`SimContext::args`]). Arguments
    /// starting with `+verilator+` are runtime options; other arguments
    /// starting with `+` become plusargs. Calling this again appends.
    pub fn command_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            let arg = arg.into();
            if let Some(option) = arg.strip_prefix(RUNTIME_PREFIX) {
                self.runtime_option(option);
            } else if let Some(plusarg) = arg.strip_prefix('+') {
                self.plusargs.push(plusarg.to_string());
            }
            self.args.push(arg);
        }
    }

    fn runtime_option(&mut self, option: &str) {
        if let Some(value) = option.strip_prefix("seed+") {
            match parse_u64(value) {
                Some(seed) => self.seed = Some(seed),
                None => tracing::warn!("ignoring {RUNTIME_PREFIX}seed+ with bad value '{value}'"),
            }
        } else if option == "debug" {
            self.debug = true;
        } else if option == "quiet" {
            self.quiet = true;
        } else {
            tracing::warn!("unknown runtime option '{RUNTIME_PREFIX}{option}' ignored");
        }
    }

    /// Returns every argument recorded by [`SimContext::command_args`], in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the value of `+name=value`; the last occurrence wins.
    pub fn plusarg_value(&self, name: &str) -> Option<&str> {
        self.plusargs.iter().rev().find_map(|p| {
            p.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }

    /// Returns whether any plusarg starts with `prefix`.
    pub fn has_plusarg(&self, prefix: &str) -> bool {
        self.plusargs.iter().any(|p| p.starts_with(prefix))
    }

    /// Returns whether the switch `+name` was given, bare or as `+name=value`.
    ///
    /// Unlike [`SimContext::has_plusarg`], `+name_suffix` does not count.
    pub fn has_flag(&self, name: &str) -> bool {
        self.plusargs.iter().any(|p| {
            p.strip_prefix(name)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('='))
        })
    }

    /// Returns whether completion has been signalled.
    pub const fn got_finish(&self) -> bool {
        self.finished
    }

    /// Signals completion. Calling it again has no further effect.
    pub fn finish(&mut self) {
        if !self.finished {
            tracing::debug!("finish requested at time {}", self.time);
            self.finished = true;
        }
    }

    /// Current simulation time.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Advances simulation time by `n`.
    pub const fn time_inc(&mut self, n: u64) {
        self.time = self.time.saturating_add(n);
    }

    /// Seed from `+verilator+seed+<n>`, if given.
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether `+verilator+debug` was given.
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Whether `+verilator+quiet` was given.
    pub const fn quiet(&self) -> bool {
        self.quiet
    }
}
