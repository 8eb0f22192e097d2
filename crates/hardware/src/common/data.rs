//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the core.
//! These types are used for the following:
//! 1. **Fault Generation:** Determining the correct misaligned or access fault trap type.
//! 2. **Transaction Recording:** Tagging bus transactions as instruction or data traffic.

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// so that faults are reported with the matching trap cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load instructions when reading data from memory into registers.
    Read,

    /// Data write access.
    ///
    /// Occurs during store instructions when writing data from registers to memory.
    Write,
}

impl AccessType {
    /// Builds the misaligned-address trap matching this access type.
    pub const fn misaligned(self, addr: u32) -> super::Trap {
        match self {
            Self::Fetch => super::Trap::InstructionAddressMisaligned(addr),
            Self::Read => super::Trap::LoadAddressMisaligned(addr),
            Self::Write => super::Trap::StoreAddressMisaligned(addr),
        }
    }

    /// Builds the access-fault trap matching this access type.
    pub const fn access_fault(self, addr: u32) -> super::Trap {
        match self {
            Self::Fetch => super::Trap::InstructionAccessFault(addr),
            Self::Read => super::Trap::LoadAccessFault(addr),
            Self::Write => super::Trap::StoreAccessFault(addr),
        }
    }
}
