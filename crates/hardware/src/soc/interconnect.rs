//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the bus that routes 32-bit physical addresses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range, checked for overlap and sorted.
//! 2. **Access routing:** Read/write by address with a last-device hint for throughput.
//! 3. **Core accesses:** Aligned, trap-checked loads and stores with optional transaction recording.
//! 4. **Tick and load:** Cycle propagation to devices and program image loading.

use super::devices::Device;
use super::transaction::BusTransaction;
use crate::common::data::AccessType;
use crate::common::error::{SimError, Trap};

/// System bus connecting the core and devices; routes accesses by physical address.
///
/// Holds a sorted list of devices (RAM and test registers), bus width and latency
/// for transfer time calculation, and the recorded data transactions when enabled.
pub struct Bus {
    /// Registered MMIO and memory devices.
    devices: Vec<Box<dyn Device>>,
    /// Bus width in bytes (4 for the 32-bit copperv bus); used to compute transfer cycles.
    pub width_bytes: u32,
    /// Base latency in cycles per transaction.
    pub latency_cycles: u64,
    last_device_idx: usize,
    ram_idx: Option<usize>,
    transactions: Option<Vec<BusTransaction>>,
    transit_cycles: u64,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field(
                "devices",
                &self.devices.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("width_bytes", &self.width_bytes)
            .field("latency_cycles", &self.latency_cycles)
            .field("recording", &self.transactions.is_some())
            .finish_non_exhaustive()
    }
}

impl Bus {
    /// Creates a new bus with the given width and latency.
    ///
    /// # Arguments
    ///
    /// * `width_bytes` - Transfer width in bytes (e.g., 4). Zero is treated as 1.
    /// * `latency_cycles` - Base cycles per transaction.
    ///
    /// # Returns
    ///
    /// An empty bus with no devices; add devices with `add_device`.
    pub fn new(width_bytes: u32, latency_cycles: u64) -> Self {
        Self {
            devices: Vec::new(),
            width_bytes: width_bytes.max(1),
            latency_cycles,
            last_device_idx: 0,
            ram_idx: None,
            transactions: None,
            transit_cycles: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidMemoryMap`] if the device region wraps past the
    /// end of the address space or overlaps a registered device.
    pub fn add_device(&mut self, dev: Box<dyn Device>) -> Result<(), SimError> {
        let (start, size) = dev.address_range();
        let end = u64::from(start) + u64::from(size);
        if end > 1 << 32 {
            return Err(SimError::InvalidMemoryMap(format!(
                "{} at {start:#x} (+{size:#x}) exceeds the 32-bit address space",
                dev.name()
            )));
        }
        for other in &self.devices {
            let (o_start, o_size) = other.address_range();
            let o_end = u64::from(o_start) + u64::from(o_size);
            if u64::from(start) < o_end && u64::from(o_start) < end {
                return Err(SimError::InvalidMemoryMap(format!(
                    "{} at {start:#x} overlaps {} at {o_start:#x}",
                    dev.name(),
                    other.name()
                )));
            }
        }
        tracing::debug!(
            "bus: {} mapped at {start:#010x}..{end:#010x}",
            dev.name()
        );
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.ram_idx = self.devices.iter().position(|d| d.name() == "RAM");
        self.last_device_idx = 0;
        Ok(())
    }

    /// Starts recording data transactions, discarding anything recorded so far.
    pub fn enable_recording(&mut self) {
        self.transactions = Some(Vec::new());
    }

    /// Returns the data transactions recorded so far (empty when recording is off).
    pub fn transactions(&self) -> &[BusTransaction] {
        self.transactions.as_deref().unwrap_or(&[])
    }

    /// Returns the cycles spent on the bus by all core accesses so far.
    pub const fn transit_cycles(&self) -> u64 {
        self.transit_cycles
    }

    /// Returns the number of cycles to transfer the given number of bytes on this bus.
    ///
    /// # Returns
    ///
    /// Cycles = base latency plus ceiling(bytes / width_bytes) transfers.
    pub fn calculate_transit_time(&self, bytes: usize) -> u64 {
        let transfers = (bytes as u64).div_ceil(u64::from(self.width_bytes));
        self.latency_cycles + transfers
    }

    /// Writes a binary blob into memory at the given physical address.
    ///
    /// If a device claims the whole range, writes via that device; otherwise falls
    /// back to byte-by-byte writes, dropping bytes no device claims.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) {
        if let Some((dev, offset)) = self.find_device(addr) {
            let (_, size) = dev.address_range();
            if u64::from(offset) + data.len() as u64 <= u64::from(size) {
                dev.write_bytes(offset, data);
                return;
            }
        }
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), *byte);
        }
    }

    /// Returns whether the given physical address is backed by any device.
    pub fn is_valid_address(&self, paddr: u32) -> bool {
        if let Some(idx) = self.ram_idx {
            if self.devices[idx].contains(paddr) {
                return true;
            }
        }
        self.devices.iter().any(|dev| dev.contains(paddr))
    }

    /// Advances all devices to the given cycle count.
    pub fn tick(&mut self, cycle: u64) {
        for dev in &mut self.devices {
            dev.tick(cycle);
        }
    }

    fn find_device(&mut self, paddr: u32) -> Option<(&mut Box<dyn Device>, u32)> {
        if self.last_device_idx < self.devices.len()
            && self.devices[self.last_device_idx].contains(paddr)
        {
            let start = self.devices[self.last_device_idx].address_range().0;
            return Some((&mut self.devices[self.last_device_idx], paddr - start));
        }

        if let Some(idx) = self.ram_idx {
            if self.devices[idx].contains(paddr) {
                self.last_device_idx = idx;
                let start = self.devices[idx].address_range().0;
                return Some((&mut self.devices[idx], paddr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            if dev.contains(paddr) {
                self.last_device_idx = i;
                let start = dev.address_range().0;
                return Some((dev, paddr - start));
            }
        }
        None
    }

    /// Performs a core load (or instruction fetch) of `size` bytes.
    ///
    /// The access must be naturally aligned and fully inside one device.
    /// Data reads are recorded when recording is enabled; fetches never are.
    ///
    /// # Errors
    ///
    /// Returns the misaligned or access-fault trap matching `access`.
    pub fn load(&mut self, addr: u32, size: u32, access: AccessType) -> Result<u32, Trap> {
        if addr % size != 0 {
            return Err(access.misaligned(addr));
        }
        let value = match self.find_device(addr) {
            Some((dev, offset)) => match size {
                1 => u32::from(dev.read_u8(offset)),
                2 => u32::from(dev.read_u16(offset)),
                _ => dev.read_u32(offset),
            },
            None => return Err(access.access_fault(addr)),
        };
        self.transit_cycles += self.calculate_transit_time(size as usize);
        if access == AccessType::Read {
            if let Some(log) = self.transactions.as_mut() {
                log.push(BusTransaction::read(addr, size, value));
            }
        }
        Ok(value)
    }

    /// Performs a core store of the low `size` bytes of `val`.
    ///
    /// # Errors
    ///
    /// Returns a store misaligned or store access-fault trap.
    pub fn store(&mut self, addr: u32, size: u32, val: u32) -> Result<(), Trap> {
        if addr % size != 0 {
            return Err(AccessType::Write.misaligned(addr));
        }
        match self.find_device(addr) {
            Some((dev, offset)) => match size {
                1 => dev.write_u8(offset, val as u8),
                2 => dev.write_u16(offset, val as u16),
                _ => dev.write_u32(offset, val),
            },
            None => return Err(AccessType::Write.access_fault(addr)),
        }
        self.transit_cycles += self.calculate_transit_time(size as usize);
        if let Some(log) = self.transactions.as_mut() {
            log.push(BusTransaction::write(addr, size, val));
        }
        Ok(())
    }

    /// Reads one byte at the given physical address; returns 0 if no device claims the address.
    pub fn read_u8(&mut self, paddr: u32) -> u8 {
        self.find_device(paddr)
            .map_or(0, |(dev, offset)| dev.read_u8(offset))
    }
    /// Reads two bytes (little-endian) at the given physical address; returns 0 if unclaimed.
    pub fn read_u16(&mut self, paddr: u32) -> u16 {
        self.find_device(paddr)
            .map_or(0, |(dev, offset)| dev.read_u16(offset))
    }
    /// Reads four bytes (little-endian) at the given physical address; returns 0 if unclaimed.
    pub fn read_u32(&mut self, paddr: u32) -> u32 {
        self.find_device(paddr)
            .map_or(0, |(dev, offset)| dev.read_u32(offset))
    }
    /// Writes one byte at the given physical address; no-op if no device claims it.
    pub fn write_u8(&mut self, paddr: u32, val: u8) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u8(offset, val);
        }
    }
    /// Writes two bytes (little-endian) at the given physical address; no-op if unclaimed.
    pub fn write_u16(&mut self, paddr: u32, val: u16) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u16(offset, val);
        }
    }
    /// Writes four bytes (little-endian) at the given physical address; no-op if unclaimed.
    pub fn write_u32(&mut self, paddr: u32, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        }
    }
}
