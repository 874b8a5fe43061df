//! Mapper implementations for NES cartridges
//!
//! Cartridges contain a memory-management controller (MMC) that decodes the
//! fixed CPU and PPU address windows onto whatever ROM/RAM the board actually
//! carries. This module provides the mapper capability interface and the two
//! board families supported here: fixed banking (mapper 000 / NROM) and the
//! serially-programmed MMC1 (mapper 001).

mod mapper000; // NROM, fixed banking
mod mapper001; // MMC1, serial shift-register banking

pub use mapper000::Mapper000;
pub use mapper001::Mapper001;

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use thiserror::Error;

use crate::mirroring::Mirroring;

/// Size of a PRG ROM bank (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of a CHR ROM bank (8KB, two 4KB halves)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Size of the PRG RAM unit mapped at the SRAM window (8KB)
pub const PRG_RAM_SIZE: usize = 8 * 1024;

/// Start of the SRAM window in CPU address space
pub const PRG_RAM_START: u16 = 0x6000;

/// Lowest CPU address decoded by a mapper. Anything below this is wired to
/// other hardware and reaching a mapper with it is a driver bug.
pub const MAPPER_CPU_ADDR_BASE: u16 = 0x6000;

/// Errors raised when a mapper is constructed from malformed bank buffers.
///
/// These are configuration invariant violations: the loader handed us
/// something no supported board can carry, so initialization must abort
/// rather than proceed with undefined banking.
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("expected 0 or 1 PRG RAM units, got {0}")]
    InvalidPrgRamUnits(u32),

    #[error("PRG ROM bank {index} is {len} bytes, expected {expected}")]
    BadPrgBankSize {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("CHR ROM bank {index} is {len} bytes, expected {expected}")]
    BadChrBankSize {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("mapper 000 supports at most 2 PRG ROM banks, got {0}")]
    TooManyPrgBanks(usize),

    #[error("mapper 000 supports at most 1 CHR ROM bank, got {0}")]
    TooManyChrBanks(usize),

    #[error("at least one PRG ROM bank is required")]
    NoPrgBanks,

    #[error("unsupported mapper: {0}")]
    UnsupportedMapper(u8),
}

/// Raw cartridge contents handed over by the loader.
///
/// PRG banks are 16KB each, CHR banks 8KB each. An empty CHR list means the
/// board carries CHR RAM instead of ROM. The mirroring flag is the solder-pad
/// configuration from the cartridge header; MMC1 boards override it at
/// runtime through their control register.
pub struct CartridgeBanks {
    pub prg_banks: Vec<Vec<u8>>,
    pub chr_banks: Vec<Vec<u8>>,
    pub prg_ram_units: u32,
    pub vertical_mirroring: bool,
}

impl CartridgeBanks {
    /// Check the bank-buffer invariants shared by all boards.
    fn validate(&self) -> Result<(), MapperError> {
        if self.prg_ram_units > 1 {
            return Err(MapperError::InvalidPrgRamUnits(self.prg_ram_units));
        }
        for (index, bank) in self.prg_banks.iter().enumerate() {
            if bank.len() != PRG_BANK_SIZE {
                return Err(MapperError::BadPrgBankSize {
                    index,
                    len: bank.len(),
                    expected: PRG_BANK_SIZE,
                });
            }
        }
        for (index, bank) in self.chr_banks.iter().enumerate() {
            if bank.len() != CHR_BANK_SIZE {
                return Err(MapperError::BadChrBankSize {
                    index,
                    len: bank.len(),
                    expected: CHR_BANK_SIZE,
                });
            }
        }
        Ok(())
    }
}

/// Capability interface for NES mappers
pub trait Mapper {
    /// Read a byte from CPU cartridge space ($6000-$FFFF)
    fn cpu_read(&self, addr: u16) -> u8;

    /// Write a byte to CPU cartridge space (SRAM or mapper registers)
    fn cpu_write(&mut self, addr: u16, value: u8);

    /// Read a byte from PPU space (pattern tables, nametables, palette)
    fn ppu_read(&self, addr: u16) -> u8;

    /// Write a byte to PPU space
    fn ppu_write(&mut self, addr: u16, value: u8);

    /// Fold a PPU address according to the active mirroring mode
    fn translate_video_address(&self, addr: u16) -> u16;

    /// Get the current mirroring mode
    fn mirroring(&self) -> Mirroring;
}

/// Shared handle to a mapper, held by both the CPU driver and the PPU
pub type SharedMapper = Rc<RefCell<dyn Mapper>>;

/// Create a new mapper instance based on mapper number
pub fn create_mapper(
    mapper_number: u8,
    banks: CartridgeBanks,
) -> Result<Box<dyn Mapper>, MapperError> {
    info!(
        "Creating mapper {}: {} PRG bank(s), {} CHR bank(s), {} PRG RAM unit(s)",
        mapper_number,
        banks.prg_banks.len(),
        banks.chr_banks.len(),
        banks.prg_ram_units
    );

    match mapper_number {
        0 => Ok(Box::new(Mapper000::new(banks)?)),
        1 => Ok(Box::new(Mapper001::new(banks)?)),
        n => Err(MapperError::UnsupportedMapper(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banks(prg: usize, chr: usize) -> CartridgeBanks {
        CartridgeBanks {
            prg_banks: vec![vec![0; PRG_BANK_SIZE]; prg],
            chr_banks: vec![vec![0; CHR_BANK_SIZE]; chr],
            prg_ram_units: 0,
            vertical_mirroring: false,
        }
    }

    #[test]
    fn test_create_mapper_rejects_unknown_numbers() {
        assert!(matches!(
            create_mapper(4, banks(2, 1)),
            Err(MapperError::UnsupportedMapper(4))
        ));
    }

    #[test]
    fn test_validation_rejects_short_banks() {
        let mut bad = banks(1, 0);
        bad.prg_banks[0].truncate(100);
        assert!(matches!(
            create_mapper(0, bad),
            Err(MapperError::BadPrgBankSize { index: 0, .. })
        ));

        let mut bad = banks(1, 1);
        bad.chr_banks[0].push(0);
        assert!(matches!(
            create_mapper(1, bad),
            Err(MapperError::BadChrBankSize { index: 0, .. })
        ));
    }

    #[test]
    fn test_validation_rejects_extra_ram_units() {
        let mut bad = banks(1, 1);
        bad.prg_ram_units = 2;
        assert!(matches!(
            create_mapper(0, bad),
            Err(MapperError::InvalidPrgRamUnits(2))
        ));
    }
}
