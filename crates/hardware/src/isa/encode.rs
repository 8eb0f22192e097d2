//! RV32I instruction encoder.
//!
//! A fluent builder that turns mnemonic-level descriptions into 32-bit
//! encodings. It is the assembler behind the bare-metal test programs in
//! [`crate::sim::programs`] and the instruction sequences used by the tests.
//!
//! Register operands are ABI indices (see [`crate::isa::abi`]); immediates are
//! the architectural values (byte offsets for branches and jumps, the upper
//! 20 bits for `lui`/`auipc`).

use crate::isa::rv32i::{funct3, funct7, opcodes::*};

/// Builder for a single RV32I instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionBuilder {
    opcode: u32,
    rd: usize,
    funct3: u32,
    rs1: usize,
    rs2: usize,
    funct7: u32,
    imm: i32,
}

impl InstructionBuilder {
    /// Creates an empty builder (all fields zero).
    pub const fn new() -> Self {
        Self {
            opcode: 0,
            rd: 0,
            funct3: 0,
            rs1: 0,
            rs2: 0,
            funct7: 0,
            imm: 0,
        }
    }

    /// Sets the major opcode.
    pub const fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    /// Sets the destination register.
    pub const fn rd(mut self, rd: usize) -> Self {
        self.rd = rd;
        self
    }

    /// Sets the first source register.
    pub const fn rs1(mut self, rs1: usize) -> Self {
        self.rs1 = rs1;
        self
    }

    /// Sets the second source register.
    pub const fn rs2(mut self, rs2: usize) -> Self {
        self.rs2 = rs2;
        self
    }

    /// Sets the funct3 field.
    pub const fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    /// Sets the funct7 field.
    pub const fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    /// Sets the immediate.
    pub const fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    const fn r_type(self, f3: u32, f7: u32, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.opcode(OP_REG).funct3(f3).funct7(f7).rd(rd).rs1(rs1).rs2(rs2)
    }

    const fn i_type(self, op: u32, f3: u32, rd: usize, rs1: usize, imm: i32) -> Self {
        self.opcode(op).funct3(f3).rd(rd).rs1(rs1).imm(imm)
    }

    const fn b_type(self, f3: u32, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.opcode(OP_BRANCH).funct3(f3).rs1(rs1).rs2(rs2).imm(offset)
    }

    // --- Upper immediates and jumps ---

    /// `lui rd, imm20`
    pub const fn lui(self, rd: usize, imm20: i32) -> Self {
        self.opcode(OP_LUI).rd(rd).imm(imm20)
    }

    /// `auipc rd, imm20`
    pub const fn auipc(self, rd: usize, imm20: i32) -> Self {
        self.opcode(OP_AUIPC).rd(rd).imm(imm20)
    }

    /// `jal rd, offset`
    pub const fn jal(self, rd: usize, offset: i32) -> Self {
        self.opcode(OP_JAL).rd(rd).imm(offset)
    }

    /// `jalr rd, imm(rs1)`
    pub const fn jalr(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_JALR, 0, rd, rs1, imm)
    }

    // --- Branches ---

    /// `beq rs1, rs2, offset`
    pub const fn beq(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BEQ, rs1, rs2, offset)
    }

    /// `bne rs1, rs2, offset`
    pub const fn bne(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BNE, rs1, rs2, offset)
    }

    /// `blt rs1, rs2, offset`
    pub const fn blt(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BLT, rs1, rs2, offset)
    }

    /// `bge rs1, rs2, offset`
    pub const fn bge(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BGE, rs1, rs2, offset)
    }

    /// `bltu rs1, rs2, offset`
    pub const fn bltu(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BLTU, rs1, rs2, offset)
    }

    /// `bgeu rs1, rs2, offset`
    pub const fn bgeu(self, rs1: usize, rs2: usize, offset: i32) -> Self {
        self.b_type(funct3::BGEU, rs1, rs2, offset)
    }

    // --- Loads and stores ---

    /// `lb rd, imm(rs1)`
    pub const fn lb(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_LOAD, funct3::LB, rd, rs1, imm)
    }

    /// `lh rd, imm(rs1)`
    pub const fn lh(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_LOAD, funct3::LH, rd, rs1, imm)
    }

    /// `lw rd, imm(rs1)`
    pub const fn lw(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_LOAD, funct3::LW, rd, rs1, imm)
    }

    /// `lbu rd, imm(rs1)`
    pub const fn lbu(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_LOAD, funct3::LBU, rd, rs1, imm)
    }

    /// `lhu rd, imm(rs1)`
    pub const fn lhu(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_LOAD, funct3::LHU, rd, rs1, imm)
    }

    /// `sb rs2, imm(rs1)`
    pub const fn sb(self, rs1: usize, rs2: usize, imm: i32) -> Self {
        self.opcode(OP_STORE).funct3(funct3::SB).rs1(rs1).rs2(rs2).imm(imm)
    }

    /// `sh rs2, imm(rs1)`
    pub const fn sh(self, rs1: usize, rs2: usize, imm: i32) -> Self {
        self.opcode(OP_STORE).funct3(funct3::SH).rs1(rs1).rs2(rs2).imm(imm)
    }

    /// `sw rs2, imm(rs1)`
    pub const fn sw(self, rs1: usize, rs2: usize, imm: i32) -> Self {
        self.opcode(OP_STORE).funct3(funct3::SW).rs1(rs1).rs2(rs2).imm(imm)
    }

    // --- Immediate arithmetic ---

    /// `addi rd, rs1, imm`
    pub const fn addi(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::ADD_SUB, rd, rs1, imm)
    }

    /// `slti rd, rs1, imm`
    pub const fn slti(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::SLT, rd, rs1, imm)
    }

    /// `sltiu rd, rs1, imm`
    pub const fn sltiu(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::SLTU, rd, rs1, imm)
    }

    /// `xori rd, rs1, imm`
    pub const fn xori(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::XOR, rd, rs1, imm)
    }

    /// `ori rd, rs1, imm`
    pub const fn ori(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::OR, rd, rs1, imm)
    }

    /// `andi rd, rs1, imm`
    pub const fn andi(self, rd: usize, rs1: usize, imm: i32) -> Self {
        self.i_type(OP_IMM, funct3::AND, rd, rs1, imm)
    }

    /// `slli rd, rs1, shamt`
    pub const fn slli(self, rd: usize, rs1: usize, shamt: u32) -> Self {
        self.i_type(OP_IMM, funct3::SLL, rd, rs1, (shamt & 0x1F) as i32)
    }

    /// `srli rd, rs1, shamt`
    pub const fn srli(self, rd: usize, rs1: usize, shamt: u32) -> Self {
        self.i_type(OP_IMM, funct3::SRL_SRA, rd, rs1, (shamt & 0x1F) as i32)
    }

    /// `srai rd, rs1, shamt`
    pub const fn srai(self, rd: usize, rs1: usize, shamt: u32) -> Self {
        let imm = ((funct7::SRA << 5) | (shamt & 0x1F)) as i32;
        self.i_type(OP_IMM, funct3::SRL_SRA, rd, rs1, imm)
    }

    // --- Register arithmetic ---

    /// `add rd, rs1, rs2`
    pub const fn add(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::ADD_SUB, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `sub rd, rs1, rs2`
    pub const fn sub(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::ADD_SUB, funct7::SUB, rd, rs1, rs2)
    }

    /// `sll rd, rs1, rs2`
    pub const fn sll(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::SLL, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `slt rd, rs1, rs2`
    pub const fn slt(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::SLT, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `sltu rd, rs1, rs2`
    pub const fn sltu(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::SLTU, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `xor rd, rs1, rs2`
    pub const fn xor(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::XOR, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `srl rd, rs1, rs2`
    pub const fn srl(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::SRL_SRA, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `sra rd, rs1, rs2`
    pub const fn sra(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::SRL_SRA, funct7::SRA, rd, rs1, rs2)
    }

    /// `or rd, rs1, rs2`
    pub const fn or(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::OR, funct7::DEFAULT, rd, rs1, rs2)
    }

    /// `and rd, rs1, rs2`
    pub const fn and(self, rd: usize, rs1: usize, rs2: usize) -> Self {
        self.r_type(funct3::AND, funct7::DEFAULT, rd, rs1, rs2)
    }

    // --- Misc ---

    /// `nop` (`addi x0, x0, 0`)
    pub const fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    /// `fence`
    pub const fn fence(self) -> Self {
        self.opcode(OP_MISC_MEM).funct3(funct3::FENCE).imm(0x0FF)
    }

    /// `ecall`
    pub const fn ecall(self) -> Self {
        self.i_type(OP_SYSTEM, funct3::PRIV, 0, 0, 0)
    }

    /// `ebreak`
    pub const fn ebreak(self) -> Self {
        self.i_type(OP_SYSTEM, funct3::PRIV, 0, 0, 1)
    }

    /// Encodes the instruction.
    pub const fn build(self) -> u32 {
        let opcode = self.opcode & 0x7F;
        let rd = ((self.rd as u32) & 0x1F) << 7;
        let funct3 = (self.funct3 & 0x7) << 12;
        let rs1 = ((self.rs1 as u32) & 0x1F) << 15;
        let rs2 = ((self.rs2 as u32) & 0x1F) << 20;
        let funct7 = (self.funct7 & 0x7F) << 25;
        let imm_val = self.imm as u32;

        match opcode {
            OP_IMM | OP_LOAD | OP_JALR | OP_MISC_MEM | OP_SYSTEM => {
                // I-type: imm[11:0] | rs1 | funct3 | rd | opcode
                ((imm_val & 0xFFF) << 20) | rs1 | funct3 | rd | opcode
            }
            OP_STORE => {
                // S-type: imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode
                let imm_11_5 = ((imm_val >> 5) & 0x7F) << 25;
                let imm_4_0 = (imm_val & 0x1F) << 7;
                imm_11_5 | rs2 | rs1 | funct3 | imm_4_0 | opcode
            }
            OP_BRANCH => {
                // B-type: imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode
                let bit_12 = ((imm_val >> 12) & 0x1) << 31;
                let bits_10_5 = ((imm_val >> 5) & 0x3F) << 25;
                let bits_4_1 = ((imm_val >> 1) & 0xF) << 8;
                let bit_11 = ((imm_val >> 11) & 0x1) << 7;
                bit_12 | bits_10_5 | rs2 | rs1 | funct3 | bits_4_1 | bit_11 | opcode
            }
            OP_LUI | OP_AUIPC => {
                // U-type: imm[31:12] | rd | opcode, immediate given unshifted.
                ((imm_val & 0xFFFFF) << 12) | rd | opcode
            }
            OP_JAL => {
                // J-type: imm[20|10:1|11|19:12] | rd | opcode
                let bit_20 = ((imm_val >> 20) & 0x1) << 31;
                let bits_10_1 = ((imm_val >> 1) & 0x3FF) << 21;
                let bit_11 = ((imm_val >> 11) & 0x1) << 20;
                let bits_19_12 = ((imm_val >> 12) & 0xFF) << 12;
                bit_20 | bits_10_1 | bit_11 | bits_19_12 | rd | opcode
            }
            // R-type and anything unrecognised: funct7 | rs2 | rs1 | funct3 | rd | opcode
            _ => funct7 | rs2 | rs1 | funct3 | rd | opcode,
        }
    }
}

/// Splits a 32-bit constant into the `lui`/`addi` immediate pair.
///
/// The low part is sign-extended by `addi`, so the high part is rounded up
/// whenever bit 11 of `value` is set.
pub const fn hi_lo(value: u32) -> (i32, i32) {
    let lo = ((value << 20) as i32) >> 20;
    let hi = (value.wrapping_sub(lo as u32) >> 12) as i32;
    (hi, lo)
}

/// Encodes `li rd, value` as `lui` + `addi` (always two instructions).
pub const fn li(rd: usize, value: u32) -> [u32; 2] {
    let (hi, lo) = hi_lo(value);
    [
        InstructionBuilder::new().lui(rd, hi).build(),
        InstructionBuilder::new().addi(rd, rd, lo).build(),
    ]
}
