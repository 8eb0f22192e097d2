//! Main Execution Step.
//!
//! This module implements the single-cycle execution of the copperv core. It performs the following:
//! 1. **Fetch:** Reads the instruction word at the program counter through the bus.
//! 2. **Decode and Execute:** Runs the RV32I base integer set; anything else is an illegal instruction.
//! 3. **Memory:** Aligned loads and stores routed to RAM or the test registers.
//! 4. **Observability:** Per-instruction tracing and instruction-mix statistics.

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::{AccessType, Trap};
use crate::core::alu::{self, AluOp};
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, opcodes};

/// `tracing` target of the per-instruction trace events.
pub const TRACE_TARGET: &str = "copperv::trace";

/// Result of one successfully executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired and the core moved on.
    Retired,
    /// The instruction retired as a jump or taken branch to itself.
    ///
    /// Nothing can change the core's state after this, so the run is over.
    SelfLoop,
}

impl Cpu {
    /// Fetches, decodes and executes one instruction.
    ///
    /// # Errors
    ///
    /// Returns the trap the instruction raised. `ECALL` and `EBREAK` are
    /// reported as traps too; see [`Trap::is_halt_request`]. A trapping
    /// instruction does not retire and leaves the program counter unchanged.
    pub fn step(&mut self) -> Result<StepOutcome, Trap> {
        let pc = self.pc;
        let inst = self.bus.bus.load(pc, INSTRUCTION_SIZE, AccessType::Fetch)?;
        let d = decode(inst);

        if self.trace {
            tracing::trace!(
                target: TRACE_TARGET,
                pc,
                inst,
                "{pc:#010x}: {inst:08x}  {}",
                disassemble(inst)
            );
        }

        let next_pc = match self.execute(pc, &d) {
            Ok(next_pc) => next_pc,
            Err(trap) => {
                self.stats.traps_taken += 1;
                return Err(trap);
            }
        };
        self.stats.bus_cycles = self.bus.bus.transit_cycles();
        self.stats.instructions_retired += 1;
        self.pc = next_pc;

        if next_pc == pc {
            Ok(StepOutcome::SelfLoop)
        } else {
            Ok(StepOutcome::Retired)
        }
    }

    /// Executes a decoded instruction and returns the next program counter.
    fn execute(&mut self, pc: u32, d: &Decoded) -> Result<u32, Trap> {
        let illegal = || Trap::IllegalInstruction(d.raw);
        let rs1 = self.regs.read(d.rs1);
        let rs2 = self.regs.read(d.rs2);
        let imm = d.imm as u32;
        let fallthrough = pc.wrapping_add(INSTRUCTION_SIZE);

        match d.opcode {
            opcodes::OP_LUI => {
                self.regs.write(d.rd, imm);
                self.stats.inst_alu += 1;
            }
            opcodes::OP_AUIPC => {
                self.regs.write(d.rd, pc.wrapping_add(imm));
                self.stats.inst_alu += 1;
            }
            opcodes::OP_JAL => {
                let target = jump_target(pc.wrapping_add(imm))?;
                self.regs.write(d.rd, fallthrough);
                self.stats.inst_jump += 1;
                return Ok(target);
            }
            opcodes::OP_JALR => {
                if d.funct3 != 0 {
                    return Err(illegal());
                }
                let target = jump_target(rs1.wrapping_add(imm) & !1)?;
                self.regs.write(d.rd, fallthrough);
                self.stats.inst_jump += 1;
                return Ok(target);
            }
            opcodes::OP_BRANCH => {
                let taken = alu::branch_taken(d.funct3, rs1, rs2).ok_or_else(illegal)?;
                self.stats.inst_branch += 1;
                if taken {
                    self.stats.branches_taken += 1;
                    return jump_target(pc.wrapping_add(imm));
                }
            }
            opcodes::OP_LOAD => {
                let (size, signed) = match d.funct3 {
                    funct3::LB => (1, true),
                    funct3::LH => (2, true),
                    funct3::LW => (4, false),
                    funct3::LBU => (1, false),
                    funct3::LHU => (2, false),
                    _ => return Err(illegal()),
                };
                let addr = rs1.wrapping_add(imm);
                let raw = self.bus.bus.load(addr, size, AccessType::Read)?;
                let val = match (size, signed) {
                    (1, true) => raw as u8 as i8 as i32 as u32,
                    (2, true) => raw as u16 as i16 as i32 as u32,
                    _ => raw,
                };
                self.regs.write(d.rd, val);
                self.stats.inst_load += 1;
            }
            opcodes::OP_STORE => {
                let size = match d.funct3 {
                    funct3::SB => 1,
                    funct3::SH => 2,
                    funct3::SW => 4,
                    _ => return Err(illegal()),
                };
                self.bus.bus.store(rs1.wrapping_add(imm), size, rs2)?;
                self.stats.inst_store += 1;
            }
            opcodes::OP_IMM => {
                let op = AluOp::from_imm(d.funct3, d.funct7).ok_or_else(illegal)?;
                self.regs.write(d.rd, alu::execute(op, rs1, imm));
                self.stats.inst_alu += 1;
            }
            opcodes::OP_REG => {
                let op = AluOp::from_reg(d.funct3, d.funct7).ok_or_else(illegal)?;
                self.regs.write(d.rd, alu::execute(op, rs1, rs2));
                self.stats.inst_alu += 1;
            }
            opcodes::OP_MISC_MEM => {
                if d.funct3 != funct3::FENCE && d.funct3 != funct3::FENCE_I {
                    return Err(illegal());
                }
                self.stats.inst_system += 1;
            }
            opcodes::OP_SYSTEM => {
                return Err(match d.raw {
                    opcodes::ECALL => Trap::EnvironmentCallFromMMode,
                    opcodes::EBREAK => Trap::Breakpoint(pc),
                    _ => illegal(),
                });
            }
            _ => return Err(illegal()),
        }

        Ok(fallthrough)
    }
}

/// Checks that a jump or taken-branch target is instruction aligned.
const fn jump_target(target: u32) -> Result<u32, Trap> {
    if target % INSTRUCTION_SIZE != 0 {
        Err(Trap::InstructionAddressMisaligned(target))
    } else {
        Ok(target)
    }
}
