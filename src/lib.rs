//! nesvid - NES video subsystem and cartridge mapper emulation core
//!
//! This crate emulates the two pieces of the NES that demand cycle-exact
//! behavior: the picture-processing unit (PPU), which produces one scanline
//! of pixels at a time, and the cartridge memory-management controllers
//! (MMC), which remap the fixed CPU/PPU address windows onto variably-sized
//! ROM/RAM banks.
//!
//! The CPU interpreter, ROM loading, audio and input live elsewhere: a
//! driver constructs a [`mappers::Mapper`] from raw bank buffers, wires a
//! [`ppu::Ppu`] to it together with a [`video::Video`] display backend, and
//! then clocks the PPU while forwarding register reads/writes and consuming
//! the NMI signal.

pub mod mappers;
pub mod mirroring;
pub mod ppu;
pub mod video;

pub use mappers::{create_mapper, CartridgeBanks, Mapper, MapperError, SharedMapper};
pub use mirroring::Mirroring;
pub use ppu::Ppu;
pub use video::{FramePacer, NullPacer, NullVideo, Sdl2Video, Video, WallClockPacer};
