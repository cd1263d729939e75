/*!
Two-color palette words and RGB332 channel expansion.

A palette is one 16-bit word holding two 8-bit indexed colors: bits [15:8]
hold the color for pixel-value 1, bits [7:0] the color for pixel-value 0.
The indexed color is RGB332 (red bits [7:5], green [4:2], blue [1:0]), the
machine's only color format; no alpha is carried in it. Resolution is
recomputed on every read, so palette words may be rewritten freely between
(or during) frames.
*/

/// Bytes per palette in the palette segment (one u16 word).
pub const PALETTE_BYTES: usize = 2;

/// A two-entry indexed color table packed into one word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette(u16);

impl Palette {
    pub fn from_word(word: u16) -> Self {
        Self(word)
    }

    pub fn word(self) -> u16 {
        self.0
    }

    /// Resolve a decoded tile bit to its indexed color: the high byte for
    /// pixel-value 1, the low byte for pixel-value 0. Panics if `bit` is
    /// not 0 or 1.
    #[inline]
    pub fn color(self, bit: u8) -> u8 {
        assert!(bit <= 1, "pixel value {bit} out of range (1-bit tiles)");
        (self.0 >> (bit * 8)) as u8
    }
}

/// Expand an RGB332 indexed color to 8-bit channels: the 3-bit red and
/// green fields are left-shifted 5, the 2-bit blue field 6.
#[inline]
pub fn rgb332_to_rgb(color: u8) -> [u8; 3] {
    [
        ((color >> 5) & 0x7) << 5,
        ((color >> 2) & 0x7) << 5,
        (color & 0x3) << 6,
    ]
}
