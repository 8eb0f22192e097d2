//! Shared start-up for the `sim_main` and `sim_bench` executables.
//!
//! Both executables pass their arguments through unchanged to the simulation
//! context. The only thing they read themselves is the log level:
//!
//! 1. **`RUST_LOG`:** Used as-is when set.
//! 2. **Runtime options:** `+verilator+debug` lowers the default to `debug`,
//!    `+verilator+quiet` raises it to `warn`.
//! 3. **Instruction trace:** `+trace` enables the per-instruction trace target.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use copperv_core::SimContext;
use copperv_core::core::cpu::execution::TRACE_TARGET;

/// Default log level implied by the runtime options in `args`.
pub fn default_level(args: &[String]) -> LevelFilter {
    if args.iter().any(|a| a == "+verilator+debug") {
        LevelFilter::DEBUG
    } else if args.iter().any(|a| a == "+verilator+quiet") {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    }
}

/// Whether `args` enable the instruction trace, as the model's config reads it.
pub fn trace_requested(args: &[String]) -> bool {
    let mut ctx = SimContext::new();
    ctx.command_args(args.iter().cloned());
    ctx.has_flag("trace")
}

/// Builds the log filter for a run with the given arguments.
pub fn env_filter(args: &[String]) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(args).into())
        .from_env_lossy();
    if !trace_requested(args) {
        return filter;
    }
    match format!("{TRACE_TARGET}=trace").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global `tracing` subscriber, logging to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(args: &[String]) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(args))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
