//! Nametable mirroring translation
//!
//! The PPU address space exposes four 1KB nametable slots ($2000-$2FFF), but
//! cartridges only wire up 2KB of physical CIRAM. The mirroring mode decides
//! which slots share a physical block. Translation is pure address folding:
//! the low 10 bits (the offset within a nametable) never change, only the
//! block-select bits do.
//!
//! Both mapper variants route their nametable accesses through this module,
//! so the folding rules live here rather than in any one mapper.

/// Start of the four nametable slots in PPU address space
pub const NAMETABLE_0: u16 = 0x2000;
pub const NAMETABLE_1: u16 = 0x2400;
pub const NAMETABLE_2: u16 = 0x2800;
pub const NAMETABLE_3: u16 = 0x2C00;

/// Size of a single nametable (1KB)
pub const NAMETABLE_SIZE: u16 = 0x0400;

/// Mirroring modes for the nametable window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// Horizontal mirroring: slots 0/1 share block 0, slots 2/3 share block 1
    Horizontal,

    /// Vertical mirroring: slots 0/2 share block 0, slots 1/3 share block 1
    Vertical,

    /// Single-screen mirroring, lower block
    SingleScreenLower,

    /// Single-screen mirroring, upper block
    SingleScreenUpper,
}

/// Fold a PPU address under horizontal mirroring.
///
/// Slot 1 collapses onto slot 0 and slot 3 onto slot 2, so the two rows of
/// the logical 2x2 nametable grid each map to one physical block. Addresses
/// outside the nametable window pass through unchanged.
pub fn translate_horizontal(addr: u16) -> u16 {
    if (NAMETABLE_1..NAMETABLE_2).contains(&addr) {
        (addr & (NAMETABLE_SIZE - 1)) + NAMETABLE_0
    } else if (NAMETABLE_3..NAMETABLE_3 + NAMETABLE_SIZE).contains(&addr) {
        (addr & (NAMETABLE_SIZE - 1)) + NAMETABLE_2
    } else {
        addr
    }
}

/// Fold a PPU address under vertical mirroring.
///
/// Slot 2 collapses onto slot 0 and slot 3 onto slot 1: the columns of the
/// grid share blocks instead of the rows.
pub fn translate_vertical(addr: u16) -> u16 {
    if (NAMETABLE_3..NAMETABLE_3 + NAMETABLE_SIZE).contains(&addr) {
        (addr & (NAMETABLE_SIZE - 1)) + NAMETABLE_1
    } else if (NAMETABLE_2..NAMETABLE_3).contains(&addr) {
        (addr & (NAMETABLE_SIZE - 1)) + NAMETABLE_0
    } else {
        addr
    }
}

/// Fold a PPU address under single-screen mirroring.
///
/// Every slot in the window collapses onto block 0. The "upper" single-screen
/// variant is this fold plus one block offset, applied by the caller.
pub fn translate_single(addr: u16) -> u16 {
    if (NAMETABLE_0..NAMETABLE_3 + NAMETABLE_SIZE).contains(&addr) {
        (addr & (NAMETABLE_SIZE - 1)) + NAMETABLE_0
    } else {
        addr
    }
}

/// Fold a PPU address according to a mirroring mode.
pub fn translate(mode: Mirroring, addr: u16) -> u16 {
    match mode {
        Mirroring::Horizontal => translate_horizontal(addr),
        Mirroring::Vertical => translate_vertical(addr),
        Mirroring::SingleScreenLower => translate_single(addr),
        Mirroring::SingleScreenUpper => {
            if (NAMETABLE_0..NAMETABLE_3 + NAMETABLE_SIZE).contains(&addr) {
                translate_single(addr) + NAMETABLE_SIZE
            } else {
                addr
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [Mirroring; 4] = [
        Mirroring::Horizontal,
        Mirroring::Vertical,
        Mirroring::SingleScreenLower,
        Mirroring::SingleScreenUpper,
    ];

    #[test]
    fn test_translation_is_idempotent() {
        for mode in MODES {
            for addr in 0x2000..0x3000u16 {
                let once = translate(mode, addr);
                let twice = translate(mode, once);
                assert_eq!(once, twice, "mode {mode:?}, addr ${addr:04X}");
            }
        }
    }

    #[test]
    fn test_translation_preserves_offset_bits() {
        for mode in MODES {
            for addr in 0x2000..0x3000u16 {
                let translated = translate(mode, addr);
                assert_eq!(
                    addr & 0x03FF,
                    translated & 0x03FF,
                    "mode {mode:?}, addr ${addr:04X}"
                );
            }
        }
    }

    #[test]
    fn test_horizontal_pairs_rows() {
        assert_eq!(translate_horizontal(0x2000), 0x2000);
        assert_eq!(translate_horizontal(0x2400), 0x2000);
        assert_eq!(translate_horizontal(0x2800), 0x2800);
        assert_eq!(translate_horizontal(0x2C00), 0x2800);
        assert_eq!(translate_horizontal(0x2415), 0x2015);
        assert_eq!(translate_horizontal(0x2C3F), 0x283F);
    }

    #[test]
    fn test_vertical_pairs_columns() {
        assert_eq!(translate_vertical(0x2000), 0x2000);
        assert_eq!(translate_vertical(0x2400), 0x2400);
        assert_eq!(translate_vertical(0x2800), 0x2000);
        assert_eq!(translate_vertical(0x2C00), 0x2400);
        assert_eq!(translate_vertical(0x2B12), 0x2312);
    }

    #[test]
    fn test_single_screen_folds_everything() {
        for addr in 0x2000..0x3000u16 {
            assert_eq!(translate_single(addr), 0x2000 + (addr & 0x03FF));
            assert_eq!(
                translate(Mirroring::SingleScreenUpper, addr),
                0x2400 + (addr & 0x03FF)
            );
        }
    }

    #[test]
    fn test_addresses_outside_window_pass_through() {
        for mode in MODES {
            assert_eq!(translate(mode, 0x0000), 0x0000);
            assert_eq!(translate(mode, 0x1FFF), 0x1FFF);
            assert_eq!(translate(mode, 0x3F00), 0x3F00);
            assert_eq!(translate(mode, 0x3F1F), 0x3F1F);
        }
    }
}
