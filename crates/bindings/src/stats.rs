//! Statistics Python binding.
//!
//! Exposes run statistics to Python: getters for cycles and the instruction
//! mix, `print` / `print_sections` for the text report, and `to_dict` for
//! JSON-serializable export.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use copperv_core::stats::SimStats;

/// Python-exposed statistics: a snapshot of `SimStats`.
#[pyclass(name = "Stats")]
#[derive(Clone, Debug)]
pub struct PyStats {
    /// The snapshot.
    pub inner: SimStats,
}

#[pymethods]
impl PyStats {
    #[getter]
    fn cycles(&self) -> u64 {
        self.inner.cycles
    }

    #[getter]
    fn reset_cycles(&self) -> u64 {
        self.inner.reset_cycles
    }

    #[getter]
    fn instructions_retired(&self) -> u64 {
        self.inner.instructions_retired
    }

    #[getter]
    fn ipc(&self) -> f64 {
        self.inner.ipc()
    }

    #[getter]
    fn bus_cycles(&self) -> u64 {
        self.inner.bus_cycles
    }

    /// Print all stats.
    fn print(&self) {
        self.inner.print();
    }

    /// Print only the given sections: "summary", "instruction_mix", "bus".
    /// Pass an empty list for all of them.
    fn print_sections(&self, sections: Vec<String>) {
        let sections: Vec<&str> = sections.iter().map(String::as_str).collect();
        self.inner.print_sections(&sections);
    }

    /// Export all counters as a dict.
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let d = PyDict::new(py);
        let s = &self.inner;
        d.set_item("cycles", s.cycles)?;
        d.set_item("reset_cycles", s.reset_cycles)?;
        d.set_item("instructions_retired", s.instructions_retired)?;
        d.set_item("ipc", s.ipc())?;
        d.set_item("inst_load", s.inst_load)?;
        d.set_item("inst_store", s.inst_store)?;
        d.set_item("inst_branch", s.inst_branch)?;
        d.set_item("branches_taken", s.branches_taken)?;
        d.set_item("inst_jump", s.inst_jump)?;
        d.set_item("inst_alu", s.inst_alu)?;
        d.set_item("inst_system", s.inst_system)?;
        d.set_item("bus_cycles", s.bus_cycles)?;
        d.set_item("traps_taken", s.traps_taken)?;
        Ok(d)
    }
}

impl From<SimStats> for PyStats {
    fn from(inner: SimStats) -> Self {
        Self { inner }
    }
}
