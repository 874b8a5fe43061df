//! nesvid demo binary
//!
//! Stands in for the CPU driver: builds a synthetic fixed-bank cartridge,
//! programs the PPU through its register interface exactly the way game code
//! would (palette and nametable uploads through PPUADDR/PPUDATA, OAM through
//! the sprite ports, scroll reset, then rendering enable), and clocks the
//! PPU against an SDL2 window until the requested number of frames has been
//! displayed.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nesvid::mappers::{CartridgeBanks, Mapper000, SharedMapper, PRG_BANK_SIZE};
use nesvid::ppu::{
    Ppu, CONTROL1_REG, CONTROL2_REG, SPR_ADDR_REG, SPR_DATA_REG, STATUS_REG, VRAM_ADDR_REG1,
    VRAM_ADDR_REG2, VRAM_DATA_REG,
};
use nesvid::video::{Sdl2Video, WallClockPacer};

/// Command line arguments for the nesvid demo
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,

    /// Scale factor for the display window
    #[clap(short, long, default_value = "3")]
    scale: u32,

    /// Number of frames to run before exiting
    #[clap(short, long, default_value = "600")]
    frames: u32,
}

/// Background palettes plus one sprite palette, 32 bytes as uploaded to $3F00
const PALETTE: [u8; 32] = [
    0x0F, 0x21, 0x11, 0x01, // backdrop, blues
    0x0F, 0x29, 0x19, 0x09, // greens
    0x0F, 0x27, 0x17, 0x07, // browns
    0x0F, 0x30, 0x10, 0x00, // grays
    0x0F, 0x16, 0x28, 0x20, // sprite: red/yellow/white
    0x0F, 0x00, 0x00, 0x00, //
    0x0F, 0x00, 0x00, 0x00, //
    0x0F, 0x00, 0x00, 0x00, //
];

/// Build an 8KB CHR bank with a few hand-drawn tiles: tile 1 solid color 1,
/// tile 2 a checker of colors 1/2, tile 3 solid color 3 (for the sprite).
fn build_chr_bank() -> Vec<u8> {
    let mut chr = vec![0u8; 8 * 1024];

    for row in 0..8 {
        // Tile 1: low plane only
        chr[16 + row] = 0xFF;

        // Tile 2: alternating pixels between color 1 and color 2
        let checker: u8 = if row % 2 == 0 { 0xAA } else { 0x55 };
        chr[32 + row] = checker;
        chr[32 + 8 + row] = !checker;

        // Tile 3: both planes
        chr[48 + row] = 0xFF;
        chr[48 + 8 + row] = 0xFF;
    }

    chr
}

/// Upload palette, nametable and attributes through PPUADDR/PPUDATA
fn upload_background(ppu: &mut Ppu) {
    ppu.write_reg(VRAM_ADDR_REG2, 0x3F);
    ppu.write_reg(VRAM_ADDR_REG2, 0x00);
    for byte in PALETTE {
        ppu.write_reg(VRAM_DATA_REG, byte);
    }

    ppu.write_reg(VRAM_ADDR_REG2, 0x20);
    ppu.write_reg(VRAM_ADDR_REG2, 0x00);
    for tile_y in 0..30u16 {
        for tile_x in 0..32u16 {
            let tile = if (tile_x + tile_y) % 2 == 0 { 1 } else { 2 };
            ppu.write_reg(VRAM_DATA_REG, tile);
        }
    }
    // Attribute table: a different palette per 16-pixel quadrant
    for _ in 0..64 {
        ppu.write_reg(VRAM_DATA_REG, 0xE4);
    }
}

fn write_sprite_0(ppu: &mut Ppu, x: u8, y: u8) {
    ppu.write_reg(SPR_ADDR_REG, 0);
    ppu.write_reg(SPR_DATA_REG, y.wrapping_sub(1));
    ppu.write_reg(SPR_DATA_REG, 3); // tile
    ppu.write_reg(SPR_DATA_REG, 0); // front priority, sprite palette 0
    ppu.write_reg(SPR_DATA_REG, x);
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    info!("nesvid demo starting...");

    let mapper = Mapper000::new(CartridgeBanks {
        prg_banks: vec![vec![0; PRG_BANK_SIZE]],
        chr_banks: vec![build_chr_bank()],
        prg_ram_units: 0,
        vertical_mirroring: false,
    })
    .with_context(|| "Failed to build demo cartridge")?;
    let mapper: SharedMapper = Rc::new(RefCell::new(mapper));

    let video = Sdl2Video::new("nesvid", args.scale)?;
    let mut ppu = Ppu::new(mapper, Box::new(video), Box::new(WallClockPacer::ntsc()));

    upload_background(&mut ppu);

    let mut sprite_x: u8 = 0;
    let mut sprite_dx: i8 = 1;
    write_sprite_0(&mut ppu, sprite_x, 112);

    // Reset the scroll origin, then enable NMI and rendering
    ppu.read_reg(STATUS_REG);
    ppu.write_reg(VRAM_ADDR_REG1, 0x00);
    ppu.write_reg(VRAM_ADDR_REG1, 0x00);
    ppu.write_reg(CONTROL1_REG, 0x80);
    ppu.write_reg(CONTROL2_REG, 0x18);

    info!("Running for {} frames", args.frames);

    let mut frames = 0;
    while frames < args.frames {
        ppu.tick();

        // Vblank is the window where a real driver mutates video state
        if ppu.is_nmi_requested() {
            ppu.acknowledge_nmi();
            frames += 1;

            if sprite_x == 248 {
                sprite_dx = -1;
            } else if sprite_x == 0 {
                sprite_dx = 1;
            }
            sprite_x = sprite_x.wrapping_add(sprite_dx as u8);
            write_sprite_0(&mut ppu, sprite_x, 112);
        }
    }

    info!("Demo finished after {frames} frames");
    Ok(())
}
