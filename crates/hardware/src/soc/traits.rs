//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte, half and word read/write at device-relative offsets.
//! 3. **Lifecycle:** Optional `tick` for devices that follow the cycle count.
//!
//! All implementors must be `Send + Sync` for use with the Python bindings.

/// Trait for memory-mapped I/O devices attached to the 32-bit system bus.
///
/// Offsets passed to the accessors are relative to the device base and are
/// always inside `address_range`; the bus checks this before dispatching.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"RAM"`, `"TEST_RESULT"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u32, u32);
    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u32) -> u8;
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&mut self, offset: u32) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u32) -> u32;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u32, val: u8);
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u32, val: u16);
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32);

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset.wrapping_add(i as u32), *byte);
        }
    }

    /// Advances device state to the given cycle count.
    fn tick(&mut self, _cycle: u64) {}

    /// Returns whether `addr` falls inside this device's region.
    fn contains(&self, addr: u32) -> bool {
        let (start, size) = self.address_range();
        addr >= start && u64::from(addr) < u64::from(start) + u64::from(size)
    }
}
