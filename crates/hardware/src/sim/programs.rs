//! Bare-metal test programs.
//!
//! Small RV32I images assembled with [`InstructionBuilder`], linked for the
//! configured memory map. Each image starts with the start-up code
//!
//! ```text
//! _start: jal ra, main
//!         j .
//! ```
//!
//! so returning from `main` parks the core on a self loop, which ends the run.

use crate::config::Config;
use crate::isa::abi::{REG_A0, REG_A4, REG_A5, REG_RA, REG_T0, REG_T1, REG_ZERO};
use crate::isa::encode::{InstructionBuilder, li};

/// Offset of the global `a` from the base of RAM.
///
/// It lies past the end of the image, in what the linker would call `.bss`;
/// nothing writes it before `main` runs.
pub const BSS_OFFSET: u32 = 0x1000;

/// An assembled program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    /// Program name, for logs.
    pub name: &'static str,
    /// Address the image is linked at.
    pub base: u32,
    /// Instruction words.
    pub text: Vec<u32>,
    /// Initialised data placed right after the instructions.
    pub data: Vec<u8>,
    /// Uninitialised globals as `(address, size)`; not part of the image.
    pub bss: Option<(u32, u32)>,
}

impl Program {
    /// The flat image: little-endian instruction words followed by the data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.text.iter().flat_map(|w| w.to_le_bytes()).collect();
        bytes.extend_from_slice(&self.data);
        bytes
    }

    /// Address of the first data byte.
    pub fn data_addr(&self) -> u32 {
        self.base + (self.text.len() as u32) * 4
    }
}

/// Assembles the uninitialised-variable test.
///
/// Equivalent to:
///
/// ```c
/// int a;
/// int main(void) {
///     if (a != 0) *TEST_RESULT = T_FAIL;
///     *TEST_RESULT = T_PASS;
///     return 0;
/// }
/// ```
///
/// The pass write is unconditional, so the register always ends holding the
/// pass value; a non-zero `a` only shows up as an overwritten fail write.
pub fn uninitialized_variable_test(config: &Config) -> Program {
    let base = config.system.ram_base;
    let a_addr = base + BSS_OFFSET;
    let b = InstructionBuilder::new;

    let mut text = vec![
        b().jal(REG_RA, 8).build(),
        b().jal(REG_ZERO, 0).build(),
    ];
    // main
    text.extend(li(REG_A5, a_addr));
    text.push(b().lw(REG_A5, REG_A5, 0).build());
    text.extend(li(REG_T0, config.system.test_result_addr));
    text.push(b().beq(REG_A5, REG_ZERO, 16).build());
    text.extend(li(REG_A4, config.harness.fail_value));
    text.push(b().sw(REG_T0, REG_A4, 0).build());
    text.extend(li(REG_A4, config.harness.pass_value));
    text.push(b().sw(REG_T0, REG_A4, 0).build());
    text.push(b().addi(REG_A0, REG_ZERO, 0).build());
    text.push(b().jalr(REG_ZERO, REG_RA, 0).build());

    Program {
        name: "uninitialized_variable_test",
        base,
        text,
        data: Vec::new(),
        bss: Some((a_addr, 4)),
    }
}

/// Assembles a program that writes `message` to `SIM_OUT`, one byte per store.
///
/// The string is stored NUL-terminated after the code; a NUL inside `message`
/// ends the output early.
pub fn print(message: &str, config: &Config) -> Program {
    const CODE_WORDS: u32 = 10;
    let base = config.system.ram_base;
    let b = InstructionBuilder::new;

    let mut text = Vec::with_capacity(CODE_WORDS as usize);
    text.extend(li(REG_A0, base + CODE_WORDS * 4));
    text.extend(li(REG_T1, config.system.sim_out_addr));
    // loop:
    text.push(b().lbu(REG_A4, REG_A0, 0).build());
    text.push(b().beq(REG_A4, REG_ZERO, 16).build());
    text.push(b().sw(REG_T1, REG_A4, 0).build());
    text.push(b().addi(REG_A0, REG_A0, 1).build());
    text.push(b().jal(REG_ZERO, -16).build());
    text.push(b().jal(REG_ZERO, 0).build());

    let mut data = message.as_bytes().to_vec();
    data.push(0);

    Program {
        name: "print",
        base,
        text,
        data,
        bss: None,
    }
}
