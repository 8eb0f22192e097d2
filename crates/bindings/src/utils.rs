//! Utility functions exposed to Python.

use pyo3::prelude::*;

/// Returns the package version string.
#[pyfunction]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Disassembles a 32-bit RV32I instruction word.
///
/// Returns a string such as `"addi sp, sp, -16"`, or `"unknown (0x????????)"`
/// for encodings outside RV32I.
#[pyfunction]
pub fn disassemble(inst: u32) -> String {
    copperv_core::isa::disasm::disassemble(inst)
}
