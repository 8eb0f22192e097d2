//! Common utilities and types shared by the core, the bus and the driver.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Memory-map defaults, test-register sentinels and instruction sizes.
//! 2. **Memory Access:** Definitions for categorizing memory operations (Fetch/Read/Write).
//! 3. **Error Handling:** Architectural traps and host-side simulation errors.
//! 4. **Register Management:** The RV32I integer register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types and trap definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{SimError, Trap};
pub use reg::RegisterFile;
