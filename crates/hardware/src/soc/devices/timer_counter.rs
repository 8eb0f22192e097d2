//! Timer counter register (`TIMER_COUNTER`).
//!
//! Reads return the low 32 bits of the number of cycles elapsed since reset
//! was released. Writes are ignored.

use crate::soc::devices::Device;

/// Timer counter device; follows the cycle count through `tick`.
#[derive(Debug)]
pub struct TimerCounter {
    base_addr: u32,
    cycles: u64,
}

impl TimerCounter {
    /// Creates the counter at `base_addr`, starting from zero.
    pub const fn new(base_addr: u32) -> Self {
        Self {
            base_addr,
            cycles: 0,
        }
    }
}

impl Device for TimerCounter {
    fn name(&self) -> &str {
        "TIMER_COUNTER"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 4)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        (self.read_u32(0) >> ((offset & 3) * 8)) as u8
    }

    fn read_u16(&mut self, offset: u32) -> u16 {
        (self.read_u32(0) >> ((offset & 2) * 8)) as u16
    }

    fn read_u32(&mut self, _offset: u32) -> u32 {
        self.cycles as u32
    }

    fn write_u8(&mut self, _offset: u32, _val: u8) {}
    fn write_u16(&mut self, _offset: u32, _val: u16) {}
    fn write_u32(&mut self, _offset: u32, _val: u32) {}

    fn tick(&mut self, cycle: u64) {
        self.cycles = cycle;
    }
}
