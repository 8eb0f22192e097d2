//! Simulation output register (`SIM_OUT`).
//!
//! Each store emits its low byte as one output character, which is how the
//! bare-metal `print` routine writes strings. Characters are collected into a
//! shared buffer the driver side can read after the run, and are optionally
//! echoed to stdout as they arrive.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::soc::devices::Device;

/// Simulation output register device.
#[derive(Debug)]
pub struct SimOut {
    base_addr: u32,
    output: Arc<Mutex<Vec<u8>>>,
    echo: bool,
}

impl SimOut {
    /// Creates the register at `base_addr` appending to `output`.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Register address.
    /// * `output` - Shared character buffer.
    /// * `echo` - When true, each character is also written to stdout.
    pub fn new(base_addr: u32, output: Arc<Mutex<Vec<u8>>>, echo: bool) -> Self {
        Self {
            base_addr,
            output,
            echo,
        }
    }

    fn emit(&self, ch: u8) {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ch);
        if self.echo {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(&[ch]);
            if ch == b'\n' {
                let _ = stdout.flush();
            }
        }
    }
}

impl Device for SimOut {
    fn name(&self) -> &str {
        "SIM_OUT"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 4)
    }

    fn read_u8(&mut self, _offset: u32) -> u8 {
        0
    }

    fn read_u16(&mut self, _offset: u32) -> u16 {
        0
    }

    fn read_u32(&mut self, _offset: u32) -> u32 {
        0
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if offset == 0 {
            self.emit(val);
        }
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        if offset == 0 {
            self.emit(val as u8);
        }
    }

    fn write_u32(&mut self, _offset: u32, val: u32) {
        self.emit(val as u8);
    }
}

impl Drop for SimOut {
    fn drop(&mut self) {
        if self.echo {
            let _ = io::stdout().flush();
        }
    }
}
