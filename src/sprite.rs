/*!
Packed sprite attribute words.

One 32-bit word per sprite slot:

```text
[31:24] tile id      (8 bits)
[23]    unused
[22:18] palette id   (5 bits)
[17:16] layer mode   (2 bits)
[15:8]  x            (unsigned screen coordinate of the left edge)
[7:0]   y            (unsigned screen coordinate of the top edge)
```

The layer-mode field doubles as the slot's liveness flag: `0b11` is the
disabled sentinel that makes the compositor skip the slot entirely, so
there is no separate existence bit. All masking and shifting lives here;
call sites never repeat the field offsets.
*/

/// Bytes per sprite in the sprite segment (one u32 word).
pub const SPRITE_BYTES: usize = 4;

const TILE_SHIFT: u32 = 24;
const PALETTE_SHIFT: u32 = 18;
const LAYER_SHIFT: u32 = 16;
const X_SHIFT: u32 = 8;

const PALETTE_MASK: u32 = 0x1F << PALETTE_SHIFT;
const LAYER_MASK: u32 = 0b11 << LAYER_SHIFT;

/// Compositing behavior of one sprite.
///
/// The two low bits form a transparency mask over pixel values: a set bit
/// `b` makes pixel-value `b` transparent. Both set is the disabled
/// sentinel (the whole sprite is skipped, its pixels never inspected).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LayerMode {
    /// Both pixel values drawn; nothing transparent.
    Opaque = 0b00,
    /// Pixel-value 0 transparent: the background shows through the tile's
    /// clear bits.
    Back = 0b01,
    /// Pixel-value 1 transparent.
    Front = 0b10,
    /// Slot skipped entirely by the compositor.
    Disabled = 0b11,
}

impl LayerMode {
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => LayerMode::Opaque,
            0b01 => LayerMode::Back,
            0b10 => LayerMode::Front,
            _ => LayerMode::Disabled,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Transparency rule: pixel-value `bit` is skipped when its flag is set
    /// in the mode mask.
    #[inline]
    pub fn masks_bit(self, bit: u8) -> bool {
        (1 << bit) & self.bits() != 0
    }
}

/// One sprite slot's packed attribute record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteAttr(u32);

impl SpriteAttr {
    /// A slot the compositor skips; every other field zeroed.
    pub const DISABLED: SpriteAttr = SpriteAttr((LayerMode::Disabled as u32) << LAYER_SHIFT);

    /// Pack an attribute word. `palette_id` is masked to 5 bits; the other
    /// fields occupy full bytes.
    pub fn pack(tile_id: u8, palette_id: u8, layer: LayerMode, x: u8, y: u8) -> Self {
        Self(
            (tile_id as u32) << TILE_SHIFT
                | ((palette_id & 0x1F) as u32) << PALETTE_SHIFT
                | (layer.bits() as u32) << LAYER_SHIFT
                | (x as u32) << X_SHIFT
                | y as u32,
        )
    }

    pub fn from_word(word: u32) -> Self {
        Self(word)
    }

    pub fn word(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn tile_id(self) -> u8 {
        (self.0 >> TILE_SHIFT) as u8
    }

    #[inline]
    pub fn palette_id(self) -> u8 {
        ((self.0 & PALETTE_MASK) >> PALETTE_SHIFT) as u8
    }

    #[inline]
    pub fn layer(self) -> LayerMode {
        LayerMode::from_bits((self.0 >> LAYER_SHIFT) as u8)
    }

    #[inline]
    pub fn x(self) -> u8 {
        (self.0 >> X_SHIFT) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn is_disabled(self) -> bool {
        self.layer() == LayerMode::Disabled
    }

    /// Replace the layer-mode bits, preserving every other field.
    pub fn with_layer(self, layer: LayerMode) -> Self {
        Self(self.0 & !LAYER_MASK | (layer.bits() as u32) << LAYER_SHIFT)
    }

    /// Replace the y field, preserving every other field.
    pub fn with_y(self, y: u8) -> Self {
        Self(self.0 & !0xFF | y as u32)
    }

    /// Replace both position fields, preserving tile/palette/layer.
    pub fn with_position(self, x: u8, y: u8) -> Self {
        Self(self.0 & !0xFFFF | (x as u32) << X_SHIFT | y as u32)
    }
}
