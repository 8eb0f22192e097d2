//! Physical System Memory (RAM).
//!
//! This module implements the RAM device of the copperv system. The backing
//! store is a plain byte vector filled with a configurable pattern at
//! construction, so memory a program never initialises (such as `.bss`, which
//! the start-up code does not clear) reads back as that pattern.

use crate::soc::devices::Device;

/// System Memory structure.
pub struct Memory {
    /// Backing storage, one element per byte.
    data: Vec<u8>,
    /// The base physical address where this memory is mapped.
    base_addr: u32,
}

impl Memory {
    /// Creates a new Memory instance.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Starting physical address.
    /// * `size` - Size in bytes.
    /// * `fill` - Byte every location holds before anything is written.
    pub fn new(base_addr: u32, size: u32, fill: u8) -> Self {
        Self {
            data: vec![fill; size as usize],
            base_addr,
        }
    }

    /// Loads a byte slice into memory at a specific offset.
    ///
    /// Data that would run past the end of memory is dropped as a whole.
    ///
    /// # Arguments
    ///
    /// * `data` - The data to write.
    /// * `offset` - The byte offset relative to the memory base address.
    pub fn load(&mut self, data: &[u8], offset: usize) {
        if let Some(dst) = self.data.get_mut(offset..offset + data.len()) {
            dst.copy_from_slice(data);
        }
    }

    /// Returns a view of the memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn bytes<const N: usize>(&self, offset: u32) -> [u8; N] {
        let mut out = [0u8; N];
        let start = offset as usize;
        if let Some(src) = self.data.get(start..start + N) {
            out.copy_from_slice(src);
        }
        out
    }
}

impl Device for Memory {
    /// Returns the device name.
    fn name(&self) -> &str {
        "RAM"
    }

    /// Returns the address range (Base, Size).
    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.data.len() as u32)
    }

    /// Reads a byte from memory.
    fn read_u8(&mut self, offset: u32) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    /// Reads a half-word (16-bit) from memory (Little Endian).
    fn read_u16(&mut self, offset: u32) -> u16 {
        u16::from_le_bytes(self.bytes(offset))
    }

    /// Reads a word (32-bit) from memory (Little Endian).
    fn read_u32(&mut self, offset: u32) -> u32 {
        u32::from_le_bytes(self.bytes(offset))
    }

    /// Writes a byte to memory.
    fn write_u8(&mut self, offset: u32, val: u8) {
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = val;
        }
    }

    /// Writes a half-word to memory (Little Endian).
    fn write_u16(&mut self, offset: u32, val: u16) {
        self.load(&val.to_le_bytes(), offset as usize);
    }

    /// Writes a word to memory (Little Endian).
    fn write_u32(&mut self, offset: u32, val: u32) {
        self.load(&val.to_le_bytes(), offset as usize);
    }

    /// Writes a slice of bytes to memory.
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        self.load(data, offset as usize);
    }
}
