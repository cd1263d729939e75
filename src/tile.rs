/*!
8x8 1-bit tile decoding.

A tile is stored in the tile segment as 8 bytes, one per row, bit 7 being
the leftmost pixel. `Tile` is the copied-out row block; decoding a pixel is
a pure bit lookup, performed once per output pixel per layer by the
compositor. No interpolation, no caching.
*/

/// Tile width in pixels.
pub const TILE_WIDTH: usize = 8;
/// Tile height in pixels.
pub const TILE_HEIGHT: usize = 8;
/// Bytes per tile in the tile segment (one byte per row).
pub const TILE_BYTES: usize = 8;

/// An 8x8, 1-bit-per-pixel bitmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    rows: [u8; TILE_BYTES],
}

impl Tile {
    pub fn from_rows(rows: [u8; TILE_BYTES]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[u8; TILE_BYTES] {
        &self.rows
    }

    /// Decode the 1-bit pixel at local (x, y).
    ///
    /// Reads row byte `y` and extracts bit `7 - x`, so bit 7 of a row is
    /// the leftmost pixel. Panics if x or y is outside [0, 8).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < TILE_WIDTH && y < TILE_HEIGHT,
            "tile pixel ({x},{y}) out of range (tiles are {TILE_WIDTH}x{TILE_HEIGHT})"
        );
        (self.rows[y] >> (7 - x)) & 1
    }
}
