//! Trap and host error definitions.
//!
//! This module defines the two error families of the simulator:
//! 1. **Trap Representation:** Synchronous exceptions raised by the RV32I core.
//! 2. **Host Errors:** Failures outside the simulated machine (files, images, configuration).

use std::fmt;
use std::path::PathBuf;

/// RV32I trap types raised by the copperv model.
///
/// The model has no trap vector: any trap ends the run. The variants follow the
/// exception causes of the RISC-V Privileged Specification that an RV32I core
/// without CSRs can raise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// Raised when a jump or branch target is not 4-byte aligned.
    /// The associated value is the misaligned address.
    InstructionAddressMisaligned(u32),

    /// Instruction access fault exception.
    ///
    /// Raised when the program counter points outside any mapped device.
    InstructionAccessFault(u32),

    /// Illegal instruction exception.
    ///
    /// Raised when an instruction encoding is not part of RV32I.
    /// The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Breakpoint exception (`EBREAK`). The associated value is the program counter.
    Breakpoint(u32),

    /// Load address misaligned exception.
    LoadAddressMisaligned(u32),

    /// Load access fault exception.
    ///
    /// Raised when a load targets an address no device claims.
    LoadAccessFault(u32),

    /// Store address misaligned exception.
    StoreAddressMisaligned(u32),

    /// Store access fault exception.
    ///
    /// Raised when a store targets an address no device claims.
    StoreAccessFault(u32),

    /// Environment call from machine mode (`ECALL`).
    EnvironmentCallFromMMode,
}

impl Trap {
    /// Returns `true` for the traps a program raises on purpose to stop the core.
    pub const fn is_halt_request(&self) -> bool {
        matches!(self, Self::Breakpoint(_) | Self::EnvironmentCallFromMMode)
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::InstructionAccessFault(addr) => write!(f, "InstructionAccessFault({addr:#x})"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#x})"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#x})"),
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#x})"),
            Self::LoadAccessFault(addr) => write!(f, "LoadAccessFault({addr:#x})"),
            Self::StoreAddressMisaligned(addr) => write!(f, "StoreAddressMisaligned({addr:#x})"),
            Self::StoreAccessFault(addr) => write!(f, "StoreAccessFault({addr:#x})"),
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
        }
    }
}

impl std::error::Error for Trap {}

/// Host-side failures: everything that goes wrong outside the simulated machine.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A program image or configuration file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program image looked like ELF but could not be parsed.
    #[error("invalid ELF image: {0}")]
    Elf(#[from] object::Error),

    /// The ELF image is not a 32-bit little-endian RISC-V executable.
    #[error("unsupported ELF image: {0}")]
    UnsupportedElf(&'static str),

    /// A loadable region does not fit in RAM.
    #[error("image region {addr:#x}..{end:#x} lies outside RAM {ram_base:#x}..{ram_end:#x}")]
    ImageOutOfRange {
        /// First byte of the region.
        addr: u64,
        /// One past the last byte of the region.
        end: u64,
        /// First byte of RAM.
        ram_base: u64,
        /// One past the last byte of RAM.
        ram_end: u64,
    },

    /// Two devices overlap, or a region does not fit the 32-bit address space.
    #[error("invalid memory map: {0}")]
    InvalidMemoryMap(String),

    /// The JSON configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A plusarg carried a value that could not be parsed.
    #[error("invalid value '{value}' for +{name}")]
    InvalidPlusarg {
        /// Plusarg name without the leading `+`.
        name: String,
        /// Offending value.
        value: String,
    },

    /// A textual expectation (register or bus transaction) could not be parsed.
    #[error("invalid expectation '{0}'")]
    InvalidExpectation(String),
}

impl SimError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Parses an unsigned integer in decimal or `0x`/`0b`/`0o` prefixed form.
///
/// Underscores are accepted as digit separators, as in Rust literals.
pub fn parse_u64(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else {
        lower.parse().ok()
    }
}
