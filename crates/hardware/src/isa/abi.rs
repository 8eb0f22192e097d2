//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines the standard ABI register indices used by the test programs and
//! the name table used by the disassembler and register expectations.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Register x5 (temporary, t0).
pub const REG_T0: usize = 5;
/// Register x6 (temporary, t1).
pub const REG_T1: usize = 6;
/// Register x7 (temporary, t2).
pub const REG_T2: usize = 7;
/// Register x10 (first argument/return value, a0).
pub const REG_A0: usize = 10;
/// Register x11 (second argument, a1).
pub const REG_A1: usize = 11;
/// Register x14 (argument, a4).
pub const REG_A4: usize = 14;
/// Register x15 (argument, a5).
pub const REG_A5: usize = 15;

/// ABI register names for x0–x31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Resolves a register name (`a0`, `fp`, `x10`) to its index.
pub fn reg_index(name: &str) -> Option<usize> {
    let name = name.trim();
    if name == "fp" {
        return Some(8);
    }
    if let Some(pos) = REG_NAMES.iter().position(|n| *n == name) {
        return Some(pos);
    }
    name.strip_prefix('x')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|idx| *idx < REG_NAMES.len())
}
