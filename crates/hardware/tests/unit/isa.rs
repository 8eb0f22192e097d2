//! # ISA Tests
//!
//! Decoding, disassembly, register names, and the encoder used to build test programs.

use copperv_core::isa::abi::{REG_A0, REG_A1, REG_RA, REG_SP, REG_T0, REG_T1, REG_ZERO, reg_index, reg_name};
use copperv_core::isa::decode::decode;
use copperv_core::isa::disasm::disassemble;
use copperv_core::isa::encode::{hi_lo, li};
use copperv_core::isa::rv32i::opcodes;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::program::b;

#[test]
fn decode_splits_fields() {
    let d = decode(b().add(REG_A0, REG_A1, REG_T0).build());
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!((d.rd, d.rs1, d.rs2), (REG_A0, REG_A1, REG_T0));
    assert_eq!(d.imm, 0);
}

#[rstest]
#[case(b().addi(REG_A0, REG_ZERO, -1).build(), -1)]
#[case(b().sw(REG_SP, REG_RA, -4).build(), -4)]
#[case(b().beq(REG_ZERO, REG_ZERO, -4096).build(), -4096)]
#[case(b().jal(REG_ZERO, 0x0F_FFFE).build(), 0x0F_FFFE)]
#[case(b().lui(REG_A0, 0x12345).build(), 0x1234_5000)]
fn immediates_sign_extend(#[case] inst: u32, #[case] imm: i32) {
    assert_eq!(decode(inst).imm, imm);
}

#[rstest]
#[case(0x00A0_0513, "addi a0, zero, 10")]
#[case(b().sub(REG_A0, REG_A1, REG_T0).build(), "sub a0, a1, t0")]
#[case(b().sra(REG_A0, REG_A1, REG_T0).build(), "sra a0, a1, t0")]
#[case(b().srai(REG_A0, REG_A1, 3).build(), "srai a0, a1, 3")]
#[case(b().slli(REG_A0, REG_A1, 31).build(), "slli a0, a1, 31")]
#[case(b().lw(REG_A0, REG_SP, -4).build(), "lw a0, -4(sp)")]
#[case(b().sb(REG_T0, REG_T1, 8).build(), "sb t1, 8(t0)")]
#[case(b().bne(REG_T0, REG_ZERO, -8).build(), "bne t0, zero, -8")]
#[case(b().lui(REG_A0, 0x12345).build(), "lui a0, 0x12345")]
#[case(b().jal(REG_RA, 8).build(), "jal ra, 8")]
#[case(b().jalr(REG_ZERO, REG_RA, 0).build(), "jalr zero, 0(ra)")]
#[case(b().fence().build(), "fence")]
#[case(b().ecall().build(), "ecall")]
#[case(b().ebreak().build(), "ebreak")]
#[case(0, "unknown (0x00000000)")]
fn disassembly(#[case] inst: u32, #[case] text: &str) {
    assert_eq!(disassemble(inst), text);
}

#[rstest]
#[case("zero", Some(0))]
#[case("fp", Some(8))]
#[case("s0", Some(8))]
#[case("a0", Some(10))]
#[case("x10", Some(10))]
#[case(" t6 ", Some(31))]
#[case("x32", None)]
#[case("q1", None)]
fn register_names_resolve(#[case] name: &str, #[case] idx: Option<usize>) {
    assert_eq!(reg_index(name), idx);
}

#[test]
fn register_names_round_trip() {
    for idx in 0..32 {
        assert_eq!(reg_index(reg_name(idx)), Some(idx));
    }
    assert_eq!(reg_name(32), "x??");
}

#[test]
fn hi_lo_rounds_up_for_negative_low_part() {
    assert_eq!(hi_lo(0x8000_0000), (0x80000, 0));
    assert_eq!(hi_lo(0x0000_0800), (1, -2048));
    assert_eq!(hi_lo(0x1234_5FFF), (0x12346, -1));
}

proptest! {
    #[test]
    fn li_reconstructs_the_constant(value: u32) {
        let [lui, addi] = li(REG_A0, value);
        let upper = decode(lui).imm as u32;
        let lower = decode(addi).imm as u32;
        prop_assert_eq!(upper.wrapping_add(lower), value);
    }

    #[test]
    fn i_type_immediate_survives_encoding(imm in -2048i32..2048, rd in 0usize..32, rs1 in 0usize..32) {
        let d = decode(b().addi(rd, rs1, imm).build());
        prop_assert_eq!((d.rd, d.rs1, d.imm), (rd, rs1, imm));
    }
}
