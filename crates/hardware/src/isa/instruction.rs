//! Instruction formats and field extraction.
//!
//! RV32I has six encodings (R, I, S, B, U, J) that share the positions of
//! `opcode`, `rd`, `funct3`, `rs1`, `rs2` and `funct7` and differ only in how the
//! immediate is scattered over the remaining bits.

use crate::isa::rv32i::opcodes;

/// Returns `width` bits of `inst` starting at bit `lo`.
#[inline]
pub const fn field(inst: u32, lo: u32, width: u32) -> u32 {
    (inst >> lo) & ((1 << width) - 1)
}

/// Encoding format of an instruction, selected by its major opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register: no immediate.
    R,
    /// 12-bit immediate in bits 31:20.
    I,
    /// 12-bit immediate split over bits 31:25 and 11:7.
    S,
    /// 13-bit even branch offset.
    B,
    /// Upper 20 bits, already in place.
    U,
    /// 21-bit even jump offset.
    J,
}

impl Format {
    /// The format used by `opcode`, or `None` for opcodes outside RV32I.
    pub const fn of(opcode: u32) -> Option<Self> {
        Some(match opcode {
            opcodes::OP_REG => Self::R,
            opcodes::OP_IMM
            | opcodes::OP_LOAD
            | opcodes::OP_JALR
            | opcodes::OP_MISC_MEM
            | opcodes::OP_SYSTEM => Self::I,
            opcodes::OP_STORE => Self::S,
            opcodes::OP_BRANCH => Self::B,
            opcodes::OP_LUI | opcodes::OP_AUIPC => Self::U,
            opcodes::OP_JAL => Self::J,
            _ => return None,
        })
    }
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Major opcode, bits 6:0.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Bits 14:12.
    pub funct3: u32,
    /// Bits 31:25.
    pub funct7: u32,
    /// Sign-extended immediate; U-type immediates keep their low 12 bits clear.
    pub imm: i32,
}

impl Decoded {
    /// Bits 31:20, which tell `ecall` from `ebreak`.
    pub const fn funct12(&self) -> u32 {
        field(self.raw, 20, 12)
    }
}
