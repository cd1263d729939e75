/*!
Stock demo content: the tile set, palettes, background and sprite layout
the machine ships with, assembled as an RPM1 image by `demo_image`.
*/

use crate::cartridge::CartridgeBuilder;
use crate::sprite::{LayerMode, SpriteAttr};
use crate::tile::TILE_BYTES;
use crate::vram::VramLayout;

pub const TILE_BLOCK: u8 = 0;
pub const TILE_CHEVRON: u8 = 1;
pub const TILE_A: u8 = 2;
pub const TILE_B: u8 = 3;
pub const TILE_M: u8 = 4;
pub const TILE_E: u8 = 5;
pub const TILE_G: u8 = 6;

/// Palette words, color-1 in the high byte. Slot 4 doubles as the text
/// palette the blink effect inverts.
pub const DEMO_PALETTES: [u16; 5] = [0xFF00, 0xAA22, 0x15A5, 0x6418, 0xFF00];

/// Tile art, one byte per row, bit 7 leftmost.
pub const DEMO_TILES: [[u8; TILE_BYTES]; 7] = [
    // block
    [
        0b1111_1111,
        0b1001_1001,
        0b1001_1001,
        0b1111_1111,
        0b1111_1111,
        0b1001_1001,
        0b1001_1001,
        0b1111_1111,
    ],
    // chevron
    [
        0b0000_1000,
        0b0000_1100,
        0b0000_1110,
        0b1111_1111,
        0b1111_1111,
        0b0000_1110,
        0b0000_1100,
        0b0000_1000,
    ],
    // 'a'
    [
        0b0000_0000,
        0b0000_0000,
        0b0011_1000,
        0b0000_0100,
        0b0011_1100,
        0b0100_0100,
        0b0011_1100,
        0b0000_0000,
    ],
    // 'B'
    [
        0b0000_0000,
        0b0100_0000,
        0b0100_0000,
        0b0111_1100,
        0b0100_0010,
        0b0100_0010,
        0b0111_1100,
        0b0000_0000,
    ],
    // 'M'
    [
        0b0000_0000,
        0b0000_0000,
        0b0111_1000,
        0b0101_0100,
        0b0101_0100,
        0b0101_0100,
        0b0101_0100,
        0b0000_0000,
    ],
    // 'E'
    [
        0b0000_0000,
        0b0000_0000,
        0b0011_1000,
        0b0100_0100,
        0b0111_1100,
        0b0100_0000,
        0b0011_1000,
        0b0000_0000,
    ],
    // 'G'
    [
        0b0000_0000,
        0b0000_0000,
        0b0011_1000,
        0b0100_0000,
        0b0101_1100,
        0b0100_0100,
        0b0011_1000,
        0b0000_0000,
    ],
];

/// Build the stock demo as an RPM1 blob: the tiles and palettes above, a
/// background whose tiles cycle by column and whose palettes advance every
/// second cell, the bobbing "MEGa" text sprites, and one opaque block.
pub fn demo_image() -> Vec<u8> {
    let layout = VramLayout::default();
    let mut builder = CartridgeBuilder::new(layout);

    for (id, rows) in DEMO_TILES.iter().enumerate() {
        builder.set_tile(id, *rows);
    }
    for (id, word) in DEMO_PALETTES.iter().enumerate() {
        builder.set_palette(id, *word);
    }

    for i in 0..layout.map_cols * layout.map_rows {
        let row = i / layout.map_cols;
        let col = i % layout.map_cols;
        let tile = (col % 7) as u8;
        let palette = (i >> 1) as u8; // masked to 2 bits on store
        builder.set_map_cell(row, col, tile, palette);
    }

    // "MEGa" at y=40, alternating front/back so the blink toggle swaps
    // their polarity in lockstep. Slot 4 is the wandering block; the
    // remaining slots stay disabled.
    builder.set_sprite(0, SpriteAttr::pack(TILE_M, 4, LayerMode::Front, 32, 40));
    builder.set_sprite(1, SpriteAttr::pack(TILE_E, 4, LayerMode::Back, 40, 40));
    builder.set_sprite(2, SpriteAttr::pack(TILE_G, 4, LayerMode::Front, 48, 40));
    builder.set_sprite(3, SpriteAttr::pack(TILE_A, 4, LayerMode::Back, 56, 40));
    builder.set_sprite(4, SpriteAttr::pack(TILE_BLOCK, 2, LayerMode::Opaque, 60, 60));

    builder.build()
}
