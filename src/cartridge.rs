/*!
Cartridge: the RPM1 memory-image blob and its loader/builder.

Features:
- Parse an RPM1 header from bytes or a file path
- Slice the payload into the four VRAM segments (tiles, sprites, palettes,
  map) using the counts the header declares
- Assemble new images with `CartridgeBuilder`, which drives the same
  masking mutation calls as live VRAM

Format (RPM1):
- 16-byte header: magic `RPM<1A>`, version (1), tile count (u16 LE),
  sprite count, palette count, map cols, map rows, 5 reserved bytes
  (written zero, ignored on read).
- Payload: the segments in VRAM order, sizes derived from the header.
  Trailing bytes after the payload are tolerated.
*/

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::palette::Palette;
use crate::sprite::SpriteAttr;
use crate::tile::TILE_BYTES;
use crate::vram::{Vram, VramLayout};

pub const RPM_MAGIC: &[u8; 4] = b"RPM\x1A";
pub const RPM_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 16;

/// A parsed memory image: the layout plus the four raw segments.
pub struct Cartridge {
    layout: VramLayout,
    tiles: Vec<u8>,
    sprites: Vec<u8>,
    palettes: Vec<u8>,
    map: Vec<u8>,
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("layout", &self.layout)
            .field("payload_bytes", &self.layout.total_bytes())
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Parse an RPM1 image from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() < HEADER_LEN {
            return Err("data too small for RPM header".into());
        }
        if &data[0..4] != RPM_MAGIC {
            return Err("invalid RPM header magic (expected RPM<1A>)".into());
        }
        let version = data[4];
        if version != RPM_VERSION {
            return Err(format!("unsupported RPM version: {version}"));
        }

        let layout = VramLayout {
            tile_count: u16::from_le_bytes([data[5], data[6]]) as usize,
            sprite_count: data[7] as usize,
            palette_count: data[8] as usize,
            map_cols: data[9] as usize,
            map_rows: data[10] as usize,
        };
        // Bytes 11..16 are reserved; readers ignore them.

        let mut offset = HEADER_LEN;
        let tiles = segment(data, &mut offset, layout.tile_segment_bytes(), "tile")?;
        let sprites = segment(data, &mut offset, layout.sprite_segment_bytes(), "sprite")?;
        let palettes = segment(data, &mut offset, layout.palette_segment_bytes(), "palette")?;
        let map = segment(data, &mut offset, layout.map_segment_bytes(), "map")?;

        debug!(
            "parsed RPM1 image: {} tiles, {} sprites, {} palettes, {}x{} map",
            layout.tile_count,
            layout.sprite_count,
            layout.palette_count,
            layout.map_cols,
            layout.map_rows
        );

        Ok(Cartridge {
            layout,
            tiles,
            sprites,
            palettes,
            map,
        })
    }

    /// Parse an RPM1 image from a file (.rpm).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let bytes = fs::read(path).map_err(|e| format!("failed to read cartridge file: {e}"))?;
        Self::from_bytes(&bytes)
    }

    // -------------- Accessors --------------

    pub fn layout(&self) -> VramLayout {
        self.layout
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn sprites(&self) -> &[u8] {
        &self.sprites
    }

    pub fn palettes(&self) -> &[u8] {
        &self.palettes
    }

    pub fn map(&self) -> &[u8] {
        &self.map
    }
}

fn segment(data: &[u8], offset: &mut usize, len: usize, what: &str) -> Result<Vec<u8>, String> {
    if data.len() < *offset + len {
        return Err(format!("data too small for {what} segment"));
    }
    let seg = data[*offset..*offset + len].to_vec();
    *offset += len;
    Ok(seg)
}

/// Assembles an RPM1 image. Wraps a scratch VRAM, so every setter applies
/// the same field masking as the live mutation API, and unset sprite slots
/// come out as the disabled sentinel.
pub struct CartridgeBuilder {
    vram: Vram,
}

impl CartridgeBuilder {
    /// Counts must fit the header fields: tiles in a u16, the rest in a u8
    /// each. Larger layouts are a programming error.
    pub fn new(layout: VramLayout) -> Self {
        assert!(
            layout.tile_count <= u16::MAX as usize,
            "tile count {} does not fit the RPM header",
            layout.tile_count
        );
        assert!(
            layout.sprite_count <= u8::MAX as usize
                && layout.palette_count <= u8::MAX as usize
                && layout.map_cols <= u8::MAX as usize
                && layout.map_rows <= u8::MAX as usize,
            "layout counts do not fit the RPM header: {layout:?}"
        );
        CartridgeBuilder {
            vram: Vram::new(layout),
        }
    }

    pub fn set_tile(&mut self, tile_id: usize, rows: [u8; TILE_BYTES]) {
        for (row, byte) in rows.iter().enumerate() {
            self.vram.set_tile_byte(tile_id, row, *byte);
        }
    }

    pub fn set_sprite(&mut self, slot: usize, attr: SpriteAttr) {
        self.vram.set_sprite(slot, attr);
    }

    pub fn set_palette(&mut self, palette_id: usize, word: u16) {
        self.vram.set_palette(palette_id, Palette::from_word(word));
    }

    pub fn set_map_cell(&mut self, row: usize, col: usize, tile_id: u8, palette_id: u8) {
        self.vram.set_map_cell(row, col, tile_id, palette_id);
    }

    /// Serialize the RPM1 blob: header, then the scratch VRAM verbatim.
    pub fn build(&self) -> Vec<u8> {
        let layout = self.vram.layout();
        let mut out = Vec::with_capacity(HEADER_LEN + layout.total_bytes());
        out.extend_from_slice(RPM_MAGIC);
        out.push(RPM_VERSION);
        out.extend_from_slice(&(layout.tile_count as u16).to_le_bytes());
        out.push(layout.sprite_count as u8);
        out.push(layout.palette_count as u8);
        out.push(layout.map_cols as u8);
        out.push(layout.map_rows as u8);
        out.extend_from_slice(&[0u8; 5]);
        out.extend_from_slice(self.vram.as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::LayerMode;
    use crate::test_utils::tiny_layout;

    #[test]
    fn builder_output_round_trips_through_parse() {
        let layout = tiny_layout();
        let mut builder = CartridgeBuilder::new(layout);
        builder.set_tile(1, [0xFF, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0xFF]);
        builder.set_palette(0, 0xE003);
        builder.set_sprite(0, SpriteAttr::pack(1, 0, LayerMode::Back, 4, 5));
        builder.set_map_cell(1, 2, 1, 0);

        let cart = Cartridge::from_bytes(&builder.build()).expect("parse");
        assert_eq!(cart.layout(), layout);
        assert_eq!(cart.tiles()[TILE_BYTES], 0xFF);
        assert_eq!(cart.palettes()[0..2], [0x03, 0xE0]);
        let attr = SpriteAttr::pack(1, 0, LayerMode::Back, 4, 5);
        assert_eq!(cart.sprites()[0..4], attr.word().to_le_bytes());
        // Cell byte: tile 1 in the top six bits, palette 0 in the bottom two.
        assert_eq!(cart.map()[layout.map_cols + 2], 0b0000_0100);
    }

    #[test]
    fn unset_sprite_slots_parse_as_disabled() {
        let cart = Cartridge::from_bytes(&CartridgeBuilder::new(tiny_layout()).build())
            .expect("parse");
        for slot_bytes in cart.sprites().chunks_exact(4) {
            let word = u32::from_le_bytes([
                slot_bytes[0],
                slot_bytes[1],
                slot_bytes[2],
                slot_bytes[3],
            ]);
            assert!(SpriteAttr::from_word(word).is_disabled());
        }
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut data = CartridgeBuilder::new(tiny_layout()).build();
        data[0] = b'X';
        let err = Cartridge::from_bytes(&data).unwrap_err();
        assert!(err.contains("magic"), "unexpected error: {err}");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut data = CartridgeBuilder::new(tiny_layout()).build();
        data[4] = 2;
        let err = Cartridge::from_bytes(&data).unwrap_err();
        assert!(err.contains("unsupported RPM version: 2"));
    }

    #[test]
    fn truncated_header_is_rejected() {
        let err = Cartridge::from_bytes(&[0u8; 8]).unwrap_err();
        assert!(err.contains("RPM header"));
    }

    #[test]
    fn truncated_payload_names_the_short_segment() {
        let data = CartridgeBuilder::new(tiny_layout()).build();
        let err = Cartridge::from_bytes(&data[..data.len() - 1]).unwrap_err();
        assert!(err.contains("map segment"), "unexpected error: {err}");
    }

    #[test]
    fn trailing_bytes_are_tolerated() {
        let mut data = CartridgeBuilder::new(tiny_layout()).build();
        data.extend_from_slice(&[0xAA; 7]);
        assert!(Cartridge::from_bytes(&data).is_ok());
    }

    #[test]
    #[should_panic(expected = "do not fit the RPM header")]
    fn oversized_layout_panics_in_the_builder() {
        let layout = VramLayout {
            sprite_count: 256,
            ..VramLayout::default()
        };
        let _ = CartridgeBuilder::new(layout);
    }
}
