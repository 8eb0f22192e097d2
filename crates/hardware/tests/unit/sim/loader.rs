//! # Program Loader Tests
//!
//! Raw and ELF32 images, from memory and from disk.

use std::io::Write;

use copperv_core::common::SimError;
use copperv_core::isa::abi::REG_A0;
use copperv_core::sim::loader::{self, ImageKind, LoadedRegion};
use copperv_core::sim::simulator::HaltReason;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::builder::elf::ElfBuilder;
use crate::common::builder::program::{b, snippet, words_to_bytes};
use crate::common::harness::{TestContext, quiet_config};

fn temp_file(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

fn answer_program() -> Vec<u8> {
    words_to_bytes(&snippet(&[b().addi(REG_A0, 0, 42).build()]))
}

#[test]
fn load_binary_reads_the_whole_file() {
    let data: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();
    let file = temp_file(&data);
    assert_eq!(loader::load_binary(file.path()).unwrap(), data);
}

#[test]
fn load_binary_reports_the_missing_path() {
    let err = loader::load_binary("/nonexistent/copperv/program.bin").unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/copperv/program.bin"));
}

#[test]
fn raw_image_starts_at_start_pc() {
    let mut tc = TestContext::new();
    let image = tc.sim.load_program(&answer_program()).unwrap().clone();
    assert_eq!(image.kind, ImageKind::Raw);
    assert_eq!(image.entry, None);
    assert_eq!(image.regions, [LoadedRegion { addr: 0, file_size: 8, mem_size: 8 }]);
    assert_eq!(tc.sim.cpu.pc, 0);
    assert_eq!(tc.run(), HaltReason::Ebreak);
    assert_eq!(tc.get_reg(REG_A0), 42);
}

#[test]
fn raw_image_larger_than_ram_is_rejected() {
    let mut tc = TestContext::new();
    let err = tc.sim.load_program(&vec![0x13; 64 * 1024 + 4]).unwrap_err();
    assert!(matches!(err, SimError::ImageOutOfRange { .. }));
}

#[test]
fn elf_segments_load_at_their_addresses() {
    let mut config = quiet_config();
    config.system.ram_fill = 0xEE;
    let elf = ElfBuilder::riscv32(0x200)
        .segment(0x200, &answer_program(), 8)
        .segment(0x400, &[1, 2, 3, 4], 16)
        .build();
    assert!(loader::is_elf(&elf));

    let mut tc = TestContext::with_config(config);
    let image = tc.sim.load_program(&elf).unwrap().clone();
    assert_eq!(image.kind, ImageKind::Elf);
    assert_eq!(image.entry, Some(0x200));
    assert_eq!(
        image.regions,
        [
            LoadedRegion { addr: 0x200, file_size: 8, mem_size: 8 },
            LoadedRegion { addr: 0x400, file_size: 4, mem_size: 16 },
        ]
    );
    assert_eq!(tc.sim.cpu.pc, 0x200);

    let bus = &mut tc.sim.cpu.bus.bus;
    assert_eq!(bus.read_u32(0x400), 0x0403_0201);
    // The zero-filled tail is not cleared.
    assert_eq!(bus.read_u32(0x404), 0xEEEE_EEEE);
    assert_eq!(bus.read_u32(0x100), 0xEEEE_EEEE);

    assert_eq!(tc.run(), HaltReason::Ebreak);
    assert_eq!(tc.get_reg(REG_A0), 42);
}

#[test]
fn elf64_is_rejected() {
    let mut elf = ElfBuilder::riscv32(0).segment(0, &answer_program(), 8);
    elf.class = 2;
    let mut tc = TestContext::new();
    let err = tc.sim.load_program(&elf.build()).unwrap_err();
    assert!(matches!(err, SimError::UnsupportedElf(_)));
}

#[test]
fn foreign_machine_is_rejected() {
    let mut elf = ElfBuilder::riscv32(0).segment(0, &answer_program(), 8);
    elf.machine = 62;
    let mut tc = TestContext::new();
    let err = tc.sim.load_program(&elf.build()).unwrap_err();
    assert!(matches!(err, SimError::UnsupportedElf(_)));
}

#[test]
fn big_endian_elf_is_rejected() {
    let mut elf = ElfBuilder::riscv32(0).segment(0, &answer_program(), 8);
    elf.data_encoding = 2;
    let mut tc = TestContext::new();
    assert!(tc.sim.load_program(&elf.build()).is_err());
}

#[test]
fn segment_outside_ram_is_rejected() {
    let elf = ElfBuilder::riscv32(0x2_0000)
        .segment(0x2_0000, &answer_program(), 8)
        .build();
    let mut tc = TestContext::new();
    let err = tc.sim.load_program(&elf).unwrap_err();
    assert!(matches!(
        err,
        SimError::ImageOutOfRange { addr: 0x2_0000, .. }
    ));
}

#[test]
fn bss_past_the_end_of_ram_is_rejected() {
    let elf = ElfBuilder::riscv32(0)
        .segment(0xFFF0, &[0; 4], 0x20)
        .build();
    let mut tc = TestContext::new();
    assert!(matches!(
        tc.sim.load_program(&elf).unwrap_err(),
        SimError::ImageOutOfRange { .. }
    ));
}

#[test]
fn program_file_is_loaded_from_disk() {
    let elf = ElfBuilder::riscv32(0x80).segment(0x80, &answer_program(), 8).build();
    let file = temp_file(&elf);
    let mut tc = TestContext::new();
    let image = tc.sim.load_program_file(file.path()).unwrap();
    assert_eq!(image.entry, Some(0x80));
    assert_eq!(tc.run(), HaltReason::Ebreak);
    assert_eq!(tc.get_reg(REG_A0), 42);
}
