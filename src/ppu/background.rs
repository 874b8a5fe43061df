//! Background rendering for the PPU
//!
//! The background is a 32x30 grid of 8x8 tiles described by the nametable,
//! with palette selection packed into the trailing attribute table. The
//! renderer walks one scanline in tile-sized steps driven by the current
//! VRAM address, so mid-frame scroll manipulation takes effect exactly where
//! real hardware would apply it.

use super::{Ppu, ScanlineBuffer, RENDER_WIDTH};

/// Nametable entry address for the tile the current VRAM address points at
pub(crate) fn tile_address(v: u16) -> u16 {
    0x2000 | (v & 0x0FFF)
}

/// Attribute table entry address for the current VRAM address
pub(crate) fn attribute_address(v: u16) -> u16 {
    0x23C0 | (v & 0x0C00) | ((v >> 4) & 0x38) | ((v >> 2) & 0x07)
}

/// Fine Y scroll component of a VRAM address
pub(crate) fn fine_y(v: u16) -> u16 {
    (v >> 12) & 0x07
}

impl Ppu {
    /// Render the background portion of one scanline into `line`.
    ///
    /// Walks the nametable horizontally starting at the current fine-X
    /// offset; the first and last tiles may contribute fewer than 8 pixels.
    /// Advances the VRAM address one coarse-X step per tile, wrapping across
    /// the nametable boundary.
    pub(crate) fn render_background(&mut self, line: &mut ScanlineBuffer) {
        let pattern_table = self.background_pattern_table_addr();
        let mut fine_x = self.fine_x;
        let mut x = 0usize;

        while x < RENDER_WIDTH {
            let name_addr = tile_address(self.v);
            let attr_addr = attribute_address(self.v);

            let tile = self.load(name_addr);
            let attr = self.load(attr_addr);

            let pattern_addr = pattern_table + (tile as u16) * 16 + fine_y(self.v);
            let plane_lo = self.load(pattern_addr);
            let plane_hi = self.load(pattern_addr + 8);

            // Quadrant of the 32x32-pixel attribute block, from the tile's
            // coarse coordinates
            let quad_x = (name_addr >> 1) & 0x01;
            let quad_y = (name_addr >> 6) & 0x01;
            let shift = 2 * (quad_x + quad_y * 2);
            let palette = (attr >> shift) & 0x03;

            while fine_x < 8 && x < RENDER_WIDTH {
                let bit = 7 - fine_x;
                let color = (((plane_hi >> bit) & 0x01) << 1) | ((plane_lo >> bit) & 0x01);

                line.color[x] = self.resolve_color(palette, color, false);
                if color != 0 {
                    line.opaque[x] = true;
                }

                fine_x += 1;
                x += 1;
            }

            fine_x = 0;
            self.coarse_x_increment();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_address_tracks_coarse_position() {
        assert_eq!(tile_address(0x0000), 0x2000);
        assert_eq!(tile_address(0x0015), 0x2015);
        // Fine Y lives above the 12 address bits and must not leak in
        assert_eq!(tile_address(0x7000), 0x2000);
        // Nametable select bits pass through
        assert_eq!(tile_address(0x0C00), 0x2C00);
    }

    #[test]
    fn test_attribute_address_packs_coarse_bits() {
        // Top-left tile of nametable 0
        assert_eq!(attribute_address(0x0000), 0x23C0);
        // Coarse X 4 -> attribute column 1
        assert_eq!(attribute_address(0x0004), 0x23C1);
        // Coarse Y 4 -> attribute row 1
        assert_eq!(attribute_address(0x0080), 0x23C8);
        // Nametable select is preserved
        assert_eq!(attribute_address(0x0C00), 0x2FC0);
    }

    #[test]
    fn test_fine_y_extraction() {
        assert_eq!(fine_y(0x0000), 0);
        assert_eq!(fine_y(0x5000), 5);
        assert_eq!(fine_y(0x7FFF), 7);
    }
}
