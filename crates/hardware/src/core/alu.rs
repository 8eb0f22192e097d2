//! Arithmetic Logic Unit (ALU).
//!
//! Implements the RV32I integer operations shared by the OP and OP-IMM
//! instruction groups, plus the branch comparator.
//!
//! Shift amounts are masked to 5 bits (0-31) per the RV32I base ISA.

use crate::isa::rv32i::{funct3, funct7};

/// Bit mask for the shift amount in RV32 (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set if less than (signed).
    Slt,
    /// Set if less than (unsigned).
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
}

impl AluOp {
    /// Selects the operation for an OP (register-register) instruction.
    ///
    /// Returns `None` for encodings outside RV32I (including the M extension).
    pub const fn from_reg(f3: u32, f7: u32) -> Option<Self> {
        Some(match (f3, f7) {
            (funct3::ADD_SUB, funct7::DEFAULT) => Self::Add,
            (funct3::ADD_SUB, funct7::SUB) => Self::Sub,
            (funct3::SLL, funct7::DEFAULT) => Self::Sll,
            (funct3::SLT, funct7::DEFAULT) => Self::Slt,
            (funct3::SLTU, funct7::DEFAULT) => Self::Sltu,
            (funct3::XOR, funct7::DEFAULT) => Self::Xor,
            (funct3::SRL_SRA, funct7::DEFAULT) => Self::Srl,
            (funct3::SRL_SRA, funct7::SRA) => Self::Sra,
            (funct3::OR, funct7::DEFAULT) => Self::Or,
            (funct3::AND, funct7::DEFAULT) => Self::And,
            _ => return None,
        })
    }

    /// Selects the operation for an OP-IMM instruction.
    ///
    /// Shift-immediates carry their funct7 in the upper immediate bits, which
    /// must be zero (or `0100000` for SRAI).
    pub const fn from_imm(f3: u32, f7: u32) -> Option<Self> {
        Some(match f3 {
            funct3::ADD_SUB => Self::Add,
            funct3::SLT => Self::Slt,
            funct3::SLTU => Self::Sltu,
            funct3::XOR => Self::Xor,
            funct3::OR => Self::Or,
            funct3::AND => Self::And,
            funct3::SLL if f7 == funct7::DEFAULT => Self::Sll,
            funct3::SRL_SRA if f7 == funct7::DEFAULT => Self::Srl,
            funct3::SRL_SRA if f7 == funct7::SRA => Self::Sra,
            _ => return None,
        })
    }
}

/// Executes an integer ALU operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform.
/// * `a`  - First operand.
/// * `b`  - Second operand (also the shift amount; only the low 5 bits are used).
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sh = b & SHAMT_MASK;
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a << sh,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Sltu => (a < b) as u32,
        AluOp::Xor => a ^ b,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i32) >> sh) as u32,
        AluOp::Or => a | b,
        AluOp::And => a & b,
    }
}

/// Evaluates a conditional branch comparison.
///
/// Returns `None` for the two reserved funct3 encodings.
pub const fn branch_taken(f3: u32, a: u32, b: u32) -> Option<bool> {
    Some(match f3 {
        funct3::BEQ => a == b,
        funct3::BNE => a != b,
        funct3::BLT => (a as i32) < (b as i32),
        funct3::BGE => (a as i32) >= (b as i32),
        funct3::BLTU => a < b,
        funct3::BGEU => a >= b,
        _ => return None,
    })
}
