//! RV32I disassembler for instruction traces and diagnostics.
//!
//! ```
//! use copperv_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A0_0513), "addi a0, zero, 10");
//! ```

use crate::isa::abi::reg_name as x;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes};

const LOADS: [Option<&str>; 8] = [
    Some("lb"),
    Some("lh"),
    Some("lw"),
    None,
    Some("lbu"),
    Some("lhu"),
    None,
    None,
];
const STORES: [Option<&str>; 8] = [Some("sb"), Some("sh"), Some("sw"), None, None, None, None, None];
const BRANCHES: [Option<&str>; 8] = [
    Some("beq"),
    Some("bne"),
    None,
    None,
    Some("blt"),
    Some("bge"),
    Some("bltu"),
    Some("bgeu"),
];
const REG_OPS: [&str; 8] = ["add", "sll", "slt", "sltu", "xor", "srl", "or", "and"];
const IMM_OPS: [&str; 8] = ["addi", "slli", "slti", "sltiu", "xori", "srli", "ori", "andi"];

/// Disassembles one instruction word, e.g. `"add a0, a1, a2"`.
///
/// Encodings outside RV32I come back as `"unknown (0x...)"`.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    render(&d).unwrap_or_else(|| format!("unknown ({inst:#010x})"))
}

fn render(d: &Decoded) -> Option<String> {
    let f3 = d.funct3 as usize;
    let (rd, rs1, rs2, imm) = (x(d.rd), x(d.rs1), x(d.rs2), d.imm);

    Some(match d.opcode {
        opcodes::OP_LUI => format!("lui {rd}, {:#x}", (imm as u32) >> 12),
        opcodes::OP_AUIPC => format!("auipc {rd}, {:#x}", (imm as u32) >> 12),
        opcodes::OP_JAL => format!("jal {rd}, {imm}"),
        opcodes::OP_JALR => format!("jalr {rd}, {imm}({rs1})"),
        opcodes::OP_BRANCH => format!("{} {rs1}, {rs2}, {imm}", BRANCHES[f3]?),
        opcodes::OP_LOAD => format!("{} {rd}, {imm}({rs1})", LOADS[f3]?),
        opcodes::OP_STORE => format!("{} {rs2}, {imm}({rs1})", STORES[f3]?),
        opcodes::OP_IMM => match d.funct3 {
            funct3::SLL | funct3::SRL_SRA => {
                let mn = if d.funct3 == funct3::SRL_SRA && d.funct7 == funct7::SRA {
                    "srai"
                } else {
                    IMM_OPS[f3]
                };
                format!("{mn} {rd}, {rs1}, {}", imm & 0x1F)
            }
            _ => format!("{} {rd}, {rs1}, {imm}", IMM_OPS[f3]),
        },
        opcodes::OP_REG => {
            let mn = match (d.funct3, d.funct7) {
                (_, funct7::DEFAULT) => REG_OPS[f3],
                (funct3::ADD_SUB, funct7::SUB) => "sub",
                (funct3::SRL_SRA, funct7::SRA) => "sra",
                _ => return None,
            };
            format!("{mn} {rd}, {rs1}, {rs2}")
        }
        opcodes::OP_MISC_MEM => match d.funct3 {
            funct3::FENCE => "fence".to_string(),
            funct3::FENCE_I => "fence.i".to_string(),
            _ => return None,
        },
        opcodes::OP_SYSTEM if d.funct3 == funct3::PRIV => match d.funct12() {
            0 => "ecall".to_string(),
            1 => "ebreak".to_string(),
            _ => return None,
        },
        _ => return None,
    })
}
