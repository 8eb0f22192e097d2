//! Simulation Python binding.
//!
//! `Simulation` is the driver loop exposed to Python: it owns a context and
//! the copperv model built from it, and lets the caller step or run the model
//! and inspect the test registers afterwards.

use std::io::Write;

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use copperv_core::sim::driver::eval_until_finish;
use copperv_core::soc::devices::TestOutcome;
use copperv_core::{Model, SimContext, Simulator};

use crate::conversion::{py_dict_to_config, sim_err};
use crate::stats::PyStats;

/// Evaluations between checks for Python signals (Ctrl-C).
const SIGNAL_CHECK_INTERVAL: u64 = 10_000;

/// A context and the copperv model built from it.
#[pyclass(name = "Simulation")]
#[derive(Debug)]
pub struct PySimulation {
    // Field order is drop order: the model is released before the context.
    model: Simulator,
    context: SimContext,
}

#[pymethods]
impl PySimulation {
    /// Creates a context from `args` and builds the model from it.
    ///
    /// `args` are passed through like process arguments (`+program=...`,
    /// `+max_cycles=...`). A `config` dict replaces `+config=`.
    #[new]
    #[pyo3(signature = (args = Vec::new(), config = None))]
    fn new(py: Python<'_>, args: Vec<String>, config: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let mut context = SimContext::new();
        context.command_args(args);
        let model = match config {
            Some(dict) => Simulator::from_config(py_dict_to_config(py, dict)?, &context),
            None => Simulator::from_context(&context),
        }
        .map_err(sim_err)?;
        Ok(Self { model, context })
    }

    /// Loads a raw or ELF image, replacing `+program=`.
    fn load_program(&mut self, data: Vec<u8>) -> PyResult<()> {
        let _ = self.model.load_program(&data).map_err(sim_err)?;
        Ok(())
    }

    /// Evaluates one step. Does nothing once the run has finished.
    fn eval(&mut self) {
        if !self.context.got_finish() {
            self.model.eval(&mut self.context);
        }
    }

    /// Whether the model has signalled completion.
    fn got_finish(&self) -> bool {
        self.context.got_finish()
    }

    /// Evaluates until completion and returns the number of steps taken.
    fn run(&mut self, py: Python<'_>) -> PyResult<u64> {
        let steps = eval_until_finish(&mut self.model, &mut self.context, |steps| {
            if steps.is_multiple_of(SIGNAL_CHECK_INTERVAL) {
                py.check_signals()?;
                let _ = std::io::stdout().flush();
            }
            Ok::<_, PyErr>(())
        })?;
        let _ = std::io::stdout().flush();
        Ok(steps)
    }

    /// Simulation time.
    fn time(&self) -> u64 {
        self.context.time()
    }

    /// Last value written to `TEST_RESULT`, or `None`.
    fn test_result(&self) -> Option<u32> {
        self.model.test_result()
    }

    /// `"pass"`, `"fail"`, `"not_written"` or `"other"`.
    fn outcome(&self) -> &'static str {
        match self.model.outcome() {
            TestOutcome::Pass => "pass",
            TestOutcome::Fail => "fail",
            TestOutcome::NotWritten => "not_written",
            TestOutcome::Other(_) => "other",
        }
    }

    /// Whether the fail value was ever written, even if later overwritten.
    fn fail_seen(&self) -> bool {
        self.model.cpu.bus.fail_seen()
    }

    /// Characters written to `SIM_OUT`.
    fn output(&self) -> String {
        self.model.output()
    }

    /// Why the core stopped, or `None` while it is running.
    fn halt_reason(&self) -> Option<String> {
        self.model.halt_reason().map(ToString::to_string)
    }

    /// Program counter.
    #[getter]
    fn pc(&self) -> u32 {
        self.model.cpu.pc
    }

    /// Integer registers x0 to x31.
    fn registers(&self) -> Vec<u32> {
        self.model.cpu.regs.snapshot().to_vec()
    }

    /// Recorded data bus transactions in text form.
    ///
    /// Raises `RuntimeError` unless `general.record_transactions` is set.
    fn transactions(&self) -> PyResult<Vec<String>> {
        if !self.model.config().general.record_transactions {
            return Err(PyRuntimeError::new_err(
                "transaction recording is off; set general.record_transactions",
            ));
        }
        Ok(self
            .model
            .cpu
            .bus
            .bus
            .transactions()
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Snapshot of the run statistics.
    fn stats(&self) -> PyStats {
        PyStats::from(self.model.stats().clone())
    }
}
