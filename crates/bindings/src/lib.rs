//! Python bindings for the copperv simulation driver.
//!
//! This crate exposes the driver loop to Python via PyO3. It provides:
//! 1. **Simulation:** `Simulation`, a context plus the copperv model, stepped or run to completion.
//! 2. **Statistics:** `Stats` for run metrics and selective section printing.
//! 3. **Utilities:** Version string and RV32I disassembly.

use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Python dict to Rust `Config` conversion and error mapping.
pub mod conversion;
/// Simulation binding (`Simulation`).
pub mod simulation;
/// Statistics binding (`Stats`).
pub mod stats;
/// Utility functions (version, disassembly).
pub mod utils;

/// Registers all classes and functions onto the given Python module.
///
/// # Errors
///
/// Returns a `PyErr` if registration fails.
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<simulation::PySimulation>()?;
    m.add_class::<stats::PyStats>()?;
    m.add_function(wrap_pyfunction!(utils::version, m)?)?;
    m.add_function(wrap_pyfunction!(utils::disassemble, m)?)?;
    Ok(())
}

/// Installs a stderr `tracing` subscriber honouring `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    init_tracing();
    register_module(m)
}
