/*!
Packed video memory: one contiguous buffer, four fixed-offset segments.

Purpose:
- Own every byte of machine state (tiles, sprites, palettes, tilemap) in a
  single allocation, segment order tiles | sprites | palettes | map.
- Expose checked, typed views over the segments so call sites never touch
  raw offsets.
- Provide the encode-and-store mutation calls (`set_map_cell`, `put_sprite`)
  that mask field values to their packed bit widths.

Notes:
- Segment sizes and offsets are fixed by the `VramLayout` at creation and
  never change.
- Indexing a view outside its declared count is a programming error and
  panics. Masking applies to stored field VALUES, never to indices.
- Multi-byte words (sprites, palettes) are stored little-endian.
*/

use crate::map::MapCell;
use crate::palette::{PALETTE_BYTES, Palette};
use crate::sprite::{LayerMode, SPRITE_BYTES, SpriteAttr};
use crate::tile::{TILE_BYTES, TILE_HEIGHT, TILE_WIDTH, Tile};

/// Entity counts for one machine. Fixed at `Vram` creation.
///
/// The default is the stock machine: 128 tiles, 32 sprites, 32 palettes,
/// a 16x16 map, and therefore a 128x128 surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VramLayout {
    pub tile_count: usize,
    pub sprite_count: usize,
    pub palette_count: usize,
    pub map_cols: usize,
    pub map_rows: usize,
}

impl Default for VramLayout {
    fn default() -> Self {
        VramLayout {
            tile_count: 128,
            sprite_count: 32,
            palette_count: 32,
            map_cols: 16,
            map_rows: 16,
        }
    }
}

impl VramLayout {
    pub fn tile_segment_bytes(&self) -> usize {
        self.tile_count * TILE_BYTES
    }

    pub fn sprite_segment_bytes(&self) -> usize {
        self.sprite_count * SPRITE_BYTES
    }

    pub fn palette_segment_bytes(&self) -> usize {
        self.palette_count * PALETTE_BYTES
    }

    pub fn map_segment_bytes(&self) -> usize {
        self.map_cols * self.map_rows
    }

    pub fn total_bytes(&self) -> usize {
        self.tile_segment_bytes()
            + self.sprite_segment_bytes()
            + self.palette_segment_bytes()
            + self.map_segment_bytes()
    }

    /// Pixel width of the surface the map covers.
    pub fn surface_width(&self) -> usize {
        self.map_cols * TILE_WIDTH
    }

    /// Pixel height of the surface the map covers.
    pub fn surface_height(&self) -> usize {
        self.map_rows * TILE_HEIGHT
    }

    fn sprite_offset(&self) -> usize {
        self.tile_segment_bytes()
    }

    fn palette_offset(&self) -> usize {
        self.sprite_offset() + self.sprite_segment_bytes()
    }

    fn map_offset(&self) -> usize {
        self.palette_offset() + self.palette_segment_bytes()
    }
}

/// The packed memory region.
pub struct Vram {
    layout: VramLayout,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for Vram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vram")
            .field("layout", &self.layout)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl Vram {
    /// Allocate a fresh region. Every segment is zeroed except the sprite
    /// table, whose slots are set to the disabled sentinel so an empty
    /// machine renders only the map.
    pub fn new(layout: VramLayout) -> Self {
        let mut vram = Vram {
            layout,
            bytes: vec![0; layout.total_bytes()],
        };
        for slot in 0..layout.sprite_count {
            vram.set_sprite(slot, SpriteAttr::DISABLED);
        }
        vram
    }

    /// Assemble a region from the four segments of an existing memory image.
    /// Each slice must match the layout's segment size exactly.
    pub fn from_segments(
        layout: VramLayout,
        tiles: &[u8],
        sprites: &[u8],
        palettes: &[u8],
        map: &[u8],
    ) -> Result<Self, String> {
        if tiles.len() != layout.tile_segment_bytes() {
            return Err(format!(
                "tile segment is {} bytes; layout needs {}",
                tiles.len(),
                layout.tile_segment_bytes()
            ));
        }
        if sprites.len() != layout.sprite_segment_bytes() {
            return Err(format!(
                "sprite segment is {} bytes; layout needs {}",
                sprites.len(),
                layout.sprite_segment_bytes()
            ));
        }
        if palettes.len() != layout.palette_segment_bytes() {
            return Err(format!(
                "palette segment is {} bytes; layout needs {}",
                palettes.len(),
                layout.palette_segment_bytes()
            ));
        }
        if map.len() != layout.map_segment_bytes() {
            return Err(format!(
                "map segment is {} bytes; layout needs {}",
                map.len(),
                layout.map_segment_bytes()
            ));
        }
        let mut bytes = Vec::with_capacity(layout.total_bytes());
        bytes.extend_from_slice(tiles);
        bytes.extend_from_slice(sprites);
        bytes.extend_from_slice(palettes);
        bytes.extend_from_slice(map);
        Ok(Vram { layout, bytes })
    }

    pub fn layout(&self) -> VramLayout {
        self.layout
    }

    /// The whole region, segment order tiles | sprites | palettes | map.
    /// Read-only; mutation goes through the typed views.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    // ----- tile store (byte-addressed) -----

    /// Read one row byte of a tile.
    #[inline]
    pub fn tile_byte(&self, tile_id: usize, row: usize) -> u8 {
        assert!(
            row < TILE_BYTES,
            "tile row {row} out of range (tiles have {TILE_BYTES} rows)"
        );
        self.bytes[self.tile_base(tile_id) + row]
    }

    /// Write one row byte of a tile. Tiles have no richer mutation call;
    /// content is authored as raw row bytes.
    #[inline]
    pub fn set_tile_byte(&mut self, tile_id: usize, row: usize, value: u8) {
        assert!(
            row < TILE_BYTES,
            "tile row {row} out of range (tiles have {TILE_BYTES} rows)"
        );
        let base = self.tile_base(tile_id);
        self.bytes[base + row] = value;
    }

    /// Copy a whole tile out of the store.
    #[inline]
    pub fn tile(&self, tile_id: usize) -> Tile {
        let base = self.tile_base(tile_id);
        let mut rows = [0u8; TILE_BYTES];
        rows.copy_from_slice(&self.bytes[base..base + TILE_BYTES]);
        Tile::from_rows(rows)
    }

    // ----- sprite table (word-addressed) -----

    #[inline]
    pub fn sprite(&self, slot: usize) -> SpriteAttr {
        let base = self.sprite_base(slot);
        let b = &self.bytes[base..base + SPRITE_BYTES];
        SpriteAttr::from_word(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn set_sprite(&mut self, slot: usize, attr: SpriteAttr) {
        let base = self.sprite_base(slot);
        self.bytes[base..base + SPRITE_BYTES].copy_from_slice(&attr.word().to_le_bytes());
    }

    // ----- palette table (halfword-addressed) -----

    #[inline]
    pub fn palette(&self, palette_id: usize) -> Palette {
        let base = self.palette_base(palette_id);
        Palette::from_word(u16::from_le_bytes([self.bytes[base], self.bytes[base + 1]]))
    }

    #[inline]
    pub fn set_palette(&mut self, palette_id: usize, palette: Palette) {
        let base = self.palette_base(palette_id);
        self.bytes[base..base + PALETTE_BYTES].copy_from_slice(&palette.word().to_le_bytes());
    }

    // ----- tilemap (byte-addressed) -----

    #[inline]
    pub fn map_cell(&self, row: usize, col: usize) -> MapCell {
        MapCell::from_byte(self.bytes[self.map_base(row, col)])
    }

    #[inline]
    pub fn set_map_cell_raw(&mut self, row: usize, col: usize, cell: MapCell) {
        let base = self.map_base(row, col);
        self.bytes[base] = cell.byte();
    }

    // ----- mutation API (encode and store) -----

    /// Place a tile on the background map. `tile_id` is masked to 6 bits and
    /// `palette_id` to 2 bits before packing; out-of-range values truncate,
    /// they do not error.
    pub fn set_map_cell(&mut self, row: usize, col: usize, tile_id: u8, palette_id: u8) {
        self.set_map_cell_raw(row, col, MapCell::pack(tile_id, palette_id));
    }

    /// Place or replace the sprite in `slot`. `palette_id` is masked to
    /// 5 bits; the remaining fields occupy whole bytes.
    pub fn put_sprite(
        &mut self,
        slot: usize,
        tile_id: u8,
        palette_id: u8,
        x: u8,
        y: u8,
        layer: LayerMode,
    ) {
        self.set_sprite(slot, SpriteAttr::pack(tile_id, palette_id, layer, x, y));
    }

    /// Write the disabled sentinel into `slot`'s layer-mode bits, leaving
    /// the other fields in place.
    pub fn disable_sprite(&mut self, slot: usize) {
        let attr = self.sprite(slot).with_layer(LayerMode::Disabled);
        self.set_sprite(slot, attr);
    }

    // ----- segment offset checks -----

    fn tile_base(&self, tile_id: usize) -> usize {
        assert!(
            tile_id < self.layout.tile_count,
            "tile id {tile_id} out of range (layout holds {} tiles)",
            self.layout.tile_count
        );
        tile_id * TILE_BYTES
    }

    fn sprite_base(&self, slot: usize) -> usize {
        assert!(
            slot < self.layout.sprite_count,
            "sprite slot {slot} out of range (layout holds {} sprites)",
            self.layout.sprite_count
        );
        self.layout.sprite_offset() + slot * SPRITE_BYTES
    }

    fn palette_base(&self, palette_id: usize) -> usize {
        assert!(
            palette_id < self.layout.palette_count,
            "palette id {palette_id} out of range (layout holds {} palettes)",
            self.layout.palette_count
        );
        self.layout.palette_offset() + palette_id * PALETTE_BYTES
    }

    fn map_base(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.layout.map_rows && col < self.layout.map_cols,
            "map cell ({row},{col}) out of range (map is {} cols x {} rows)",
            self.layout.map_cols,
            self.layout.map_rows
        );
        self.layout.map_offset() + row * self.layout.map_cols + col
    }
}
