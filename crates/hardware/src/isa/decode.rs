//! RV32I instruction decoder.
//!
//! Splits an encoding into its register and function fields and reassembles
//! the immediate for the instruction's [`Format`].

use crate::isa::instruction::{Decoded, Format, field};

/// Decodes an instruction word.
///
/// Decoding never fails: opcodes outside RV32I decode with `imm == 0` and are
/// rejected as illegal by the core when executed.
pub fn decode(inst: u32) -> Decoded {
    let opcode = field(inst, 0, 7);
    Decoded {
        raw: inst,
        opcode,
        rd: field(inst, 7, 5) as usize,
        rs1: field(inst, 15, 5) as usize,
        rs2: field(inst, 20, 5) as usize,
        funct3: field(inst, 12, 3),
        funct7: field(inst, 25, 7),
        imm: Format::of(opcode).map_or(0, |format| immediate(inst, format)),
    }
}

/// Reassembles the immediate of `inst` as encoded in `format`.
pub const fn immediate(inst: u32, format: Format) -> i32 {
    match format {
        Format::R => 0,
        Format::I => (inst as i32) >> 20,
        Format::S => sign_extend((field(inst, 25, 7) << 5) | field(inst, 7, 5), 12),
        Format::B => sign_extend(
            (field(inst, 31, 1) << 12)
                | (field(inst, 7, 1) << 11)
                | (field(inst, 25, 6) << 5)
                | (field(inst, 8, 4) << 1),
            13,
        ),
        Format::U => (inst & 0xFFFF_F000) as i32,
        Format::J => sign_extend(
            (field(inst, 31, 1) << 20)
                | (field(inst, 12, 8) << 12)
                | (field(inst, 20, 1) << 11)
                | (field(inst, 21, 10) << 1),
            21,
        ),
    }
}

const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((val << shift) as i32) >> shift
}
