//! Program Loader.
//!
//! This module places program images in RAM before the first instruction. It performs:
//! 1. **Binary loading:** Reads an image from disk into a byte buffer.
//! 2. **Format detection:** ELF images are recognised by their magic; anything else is raw.
//! 3. **Raw images:** Copied to the base of RAM; execution starts at `general.start_pc`.
//! 4. **ELF images:** Each `PT_LOAD` segment is copied to its physical address and
//!    execution starts at the ELF entry point. The zero-filled tail of a segment
//!    (`.bss`) is not cleared; it keeps whatever RAM held before loading.

use std::fs;
use std::path::Path;

use object::elf::EM_RISCV;
use object::read::elf::{ElfFile32, FileHeader};
use object::{Endianness, Object, ObjectSegment};

use crate::common::error::SimError;
use crate::config::SystemConfig;
use crate::soc::System;

/// ELF file magic.
const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// `e_ident[EI_CLASS]` value for 32-bit images.
const ELF_CLASS_32: u8 = 1;

/// Format of a loaded program image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    /// Flat binary copied to the base of RAM.
    Raw,
    /// ELF32 executable loaded by segment.
    Elf,
}

/// A region of RAM written by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedRegion {
    /// First byte written.
    pub addr: u32,
    /// Bytes copied from the image.
    pub file_size: u32,
    /// Bytes the segment occupies in memory; the tail past `file_size` is left untouched.
    pub mem_size: u32,
}

/// Summary of a loaded program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Image format.
    pub kind: ImageKind,
    /// Entry point for ELF images; raw images start at the configured pc.
    pub entry: Option<u32>,
    /// Regions written.
    pub regions: Vec<LoadedRegion>,
}

/// Loads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns [`SimError::Io`] naming the path when the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SimError::io(path, e))
}

/// Returns whether `data` starts with the ELF magic.
pub fn is_elf(data: &[u8]) -> bool {
    data.starts_with(ELF_MAGIC)
}

/// Loads a raw or ELF image into the system's RAM.
///
/// # Errors
///
/// Fails if the image does not fit in RAM or is an ELF file that is not a
/// 32-bit little-endian RISC-V executable.
pub fn load_image(
    system: &mut System,
    data: &[u8],
    config: &SystemConfig,
) -> Result<LoadedImage, SimError> {
    if is_elf(data) {
        load_elf(system, data, config)
    } else {
        load_raw(system, data, config)
    }
}

/// Copies a flat binary to the base of RAM.
///
/// # Errors
///
/// Returns [`SimError::ImageOutOfRange`] if the binary is larger than RAM.
pub fn load_raw(
    system: &mut System,
    data: &[u8],
    config: &SystemConfig,
) -> Result<LoadedImage, SimError> {
    let region = check_region(config, u64::from(config.ram_base), data.len() as u64, data.len() as u64)?;
    system.load_binary_at(data, config.ram_base);
    tracing::debug!(
        "loader: raw image, {} bytes at {:#010x}",
        data.len(),
        config.ram_base
    );
    Ok(LoadedImage {
        kind: ImageKind::Raw,
        entry: None,
        regions: vec![region],
    })
}

/// Loads the `PT_LOAD` segments of an ELF32 RISC-V executable.
///
/// # Errors
///
/// Returns [`SimError::UnsupportedElf`] for 64-bit, big-endian or
/// non-RISC-V images, [`SimError::Elf`] for malformed ones, and
/// [`SimError::ImageOutOfRange`] for segments outside RAM.
pub fn load_elf(
    system: &mut System,
    data: &[u8],
    config: &SystemConfig,
) -> Result<LoadedImage, SimError> {
    if data.get(4) != Some(&ELF_CLASS_32) {
        return Err(SimError::UnsupportedElf("not a 32-bit image"));
    }
    let file = ElfFile32::<Endianness>::parse(data)?;
    if !file.is_little_endian() {
        return Err(SimError::UnsupportedElf("not little-endian"));
    }
    if file.elf_header().e_machine(file.endian()) != EM_RISCV {
        return Err(SimError::UnsupportedElf("not a RISC-V image"));
    }

    let mut regions = Vec::new();
    for segment in file.segments() {
        let bytes = segment.data()?;
        let (addr, mem_size) = (segment.address(), segment.size());
        if mem_size == 0 {
            continue;
        }
        let region = check_region(config, addr, bytes.len() as u64, mem_size)?;
        system.load_binary_at(bytes, region.addr);
        if region.mem_size > region.file_size {
            tracing::debug!(
                "loader: {:#x} bytes at {:#010x} left uncleared",
                region.mem_size - region.file_size,
                u64::from(region.addr) + u64::from(region.file_size)
            );
        }
        regions.push(region);
    }

    let entry = u32::try_from(file.entry())
        .map_err(|_| SimError::UnsupportedElf("entry point outside the 32-bit address space"))?;
    tracing::debug!(
        "loader: ELF image, {} segment(s), entry {entry:#010x}",
        regions.len()
    );
    Ok(LoadedImage {
        kind: ImageKind::Elf,
        entry: Some(entry),
        regions,
    })
}

fn check_region(
    config: &SystemConfig,
    addr: u64,
    file_size: u64,
    mem_size: u64,
) -> Result<LoadedRegion, SimError> {
    let ram_base = u64::from(config.ram_base);
    let ram_end = config.ram_end();
    let end = addr + mem_size.max(file_size);
    if addr < ram_base || end > ram_end {
        return Err(SimError::ImageOutOfRange {
            addr,
            end,
            ram_base,
            ram_end,
        });
    }
    Ok(LoadedRegion {
        addr: addr as u32,
        file_size: file_size as u32,
        mem_size: mem_size.max(file_size) as u32,
    })
}
