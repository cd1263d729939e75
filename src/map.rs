/*!
Packed background map cells: one byte per cell, `tile_id` in the top 6 bits
and `palette_id` in the bottom 2. Packing masks both fields to their bit
widths; out-of-range ids are truncated by contract, not rejected.
*/

/// One background map cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapCell(u8);

impl MapCell {
    /// Pack a cell byte. `tile_id` is masked to 6 bits, `palette_id` to 2.
    pub fn pack(tile_id: u8, palette_id: u8) -> Self {
        Self((tile_id & 0x3F) << 2 | (palette_id & 0x03))
    }

    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn tile_id(self) -> u8 {
        self.0 >> 2
    }

    #[inline]
    pub fn palette_id(self) -> u8 {
        self.0 & 0x03
    }
}
