//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components that make up the simulated system:
//! the system bus, RAM, the memory-mapped test registers, and the builder
//! that assembles them.

/// System builder for assembling SoC components.
pub mod builder;

/// Memory-mapped test register implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// RAM device.
pub mod memory;

/// Device trait definitions for MMIO access.
pub mod traits;

/// Recorded data bus transactions.
pub mod transaction;

pub use builder::System;
pub use transaction::BusTransaction;
