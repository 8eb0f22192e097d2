//! # ALU Tests

use copperv_core::core::alu::{self, AluOp};
use copperv_core::isa::rv32i::{funct3, funct7};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 0xFFFF_FFFF, 1, 0)]
#[case(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
#[case(AluOp::Sll, 0x1, 31, 0x8000_0000)]
#[case(AluOp::Slt, 0xFFFF_FFFE, 1, 1)]
#[case(AluOp::Sltu, 0xFFFF_FFFE, 1, 0)]
#[case(AluOp::Xor, 0xF0F0, 0xFF00, 0x0FF0)]
#[case(AluOp::Srl, 0x8000_0000, 4, 0x0800_0000)]
#[case(AluOp::Sra, 0x8000_0000, 4, 0xF800_0000)]
#[case(AluOp::Or, 0xF000, 0x000F, 0xF00F)]
#[case(AluOp::And, 0xFF0F, 0x0FF0, 0x0F00)]
fn executes(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(alu::execute(op, a, b), expected);
}

#[test]
fn decodes_function_codes() {
    assert_eq!(AluOp::from_reg(funct3::ADD_SUB, funct7::SUB), Some(AluOp::Sub));
    assert_eq!(AluOp::from_reg(funct3::SRL_SRA, funct7::SRA), Some(AluOp::Sra));
    assert_eq!(AluOp::from_reg(funct3::ADD_SUB, 0b0000001), None);
    // addi has no subtract form; the upper immediate bits are just immediate.
    assert_eq!(AluOp::from_imm(funct3::ADD_SUB, funct7::SUB), Some(AluOp::Add));
    assert_eq!(AluOp::from_imm(funct3::SRL_SRA, funct7::SRA), Some(AluOp::Sra));
}

#[rstest]
#[case(funct3::BEQ, 5, 5, Some(true))]
#[case(funct3::BNE, 5, 5, Some(false))]
#[case(funct3::BLT, u32::MAX, 0, Some(true))]
#[case(funct3::BGE, u32::MAX, 0, Some(false))]
#[case(funct3::BLTU, u32::MAX, 0, Some(false))]
#[case(funct3::BGEU, u32::MAX, 0, Some(true))]
#[case(0b010, 0, 0, None)]
#[case(0b011, 0, 0, None)]
fn branch_conditions(#[case] f3: u32, #[case] a: u32, #[case] b: u32, #[case] expected: Option<bool>) {
    assert_eq!(alu::branch_taken(f3, a, b), expected);
}

proptest! {
    #[test]
    fn sub_undoes_add(a: u32, b: u32) {
        prop_assert_eq!(alu::execute(AluOp::Sub, alu::execute(AluOp::Add, a, b), b), a);
    }

    #[test]
    fn blt_and_bge_are_complementary(a: u32, b: u32) {
        prop_assert_ne!(
            alu::branch_taken(funct3::BLT, a, b),
            alu::branch_taken(funct3::BGE, a, b)
        );
    }
}
