//! Python↔Rust conversion helpers.
//!
//! Configuration dicts cross the boundary as JSON, so Python and `+config=`
//! files share one schema. Host errors become Python exceptions.

use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use copperv_core::common::SimError;
use copperv_core::config::Config;

/// Converts a Python dict to a simulator `Config`.
///
/// The dict is serialized with Python's `json.dumps` and deserialized into
/// `Config`. Keys follow the JSON layout (`general`, `system`, `harness`);
/// missing keys take their defaults.
///
/// # Errors
///
/// Returns a `ValueError` if the dict does not describe a valid configuration.
pub fn py_dict_to_config(py: Python<'_>, dict: &Bound<'_, PyAny>) -> PyResult<Config> {
    let json = py.import("json")?;
    let json_str: String = json.getattr("dumps")?.call1((dict,))?.extract()?;
    Config::from_json_str(&json_str).map_err(sim_err)
}

/// Maps a host-side simulator error to the closest Python exception.
pub fn sim_err(err: SimError) -> PyErr {
    match err {
        SimError::Io { .. } => PyOSError::new_err(err.to_string()),
        SimError::Config(_) | SimError::InvalidPlusarg { .. } | SimError::InvalidExpectation(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}
