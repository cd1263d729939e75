//! Shared test fixtures: a small machine layout, known palette/tile data,
//! and pixel accessors over raw RGBA framebuffers.
//!
//! Color conventions used across the suite:
//! - `RED_ON_BLUE` (0xE003): pixel-value 1 renders pure red, pixel-value 0
//!   pure blue, so layer polarity mistakes show up as the wrong channel.
//!
//! These helpers support just what the test suite needs.

#![allow(dead_code)]

use crate::vram::VramLayout;

/// Palette word mapping pixel-value 1 to red and pixel-value 0 to blue.
pub const RED_ON_BLUE: u16 = 0xE003;
/// `rgb332_to_rgb(0xE0)`.
pub const RED: [u8; 3] = [0xE0, 0x00, 0x00];
/// `rgb332_to_rgb(0x03)`.
pub const BLUE: [u8; 3] = [0x00, 0x00, 0xC0];

/// Top four rows set, bottom four clear: both pixel values present, split
/// by row half, so transparency rules are visible at a glance.
pub const TOP_HALF_TILE: [u8; 8] = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00];

/// A layout small enough to reason about byte-for-byte in fixtures:
/// 4 tiles, 2 sprites, 2 palettes, 4x2 map (32x16 surface).
pub fn tiny_layout() -> VramLayout {
    VramLayout {
        tile_count: 4,
        sprite_count: 2,
        palette_count: 2,
        map_cols: 4,
        map_rows: 2,
    }
}

/// RGB channels of pixel (x, y) in a `width`-wide RGBA framebuffer.
#[inline]
pub fn pixel_rgb(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
    let fi = (y * width + x) * 4;
    [frame[fi], frame[fi + 1], frame[fi + 2]]
}

/// All four channels of pixel (x, y).
#[inline]
pub fn pixel_rgba(frame: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let fi = (y * width + x) * 4;
    [frame[fi], frame[fi + 1], frame[fi + 2], frame[fi + 3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, rgb332_to_rgb};

    #[test]
    fn stock_colors_expand_as_documented() {
        let palette = Palette::from_word(RED_ON_BLUE);
        assert_eq!(rgb332_to_rgb(palette.color(1)), RED);
        assert_eq!(rgb332_to_rgb(palette.color(0)), BLUE);
    }

    #[test]
    fn pixel_accessors_are_row_major() {
        // 2x2 RGBA buffer with distinct bytes everywhere.
        let frame: Vec<u8> = (0..16).collect();
        assert_eq!(pixel_rgba(&frame, 2, 0, 0), [0, 1, 2, 3]);
        assert_eq!(pixel_rgba(&frame, 2, 1, 0), [4, 5, 6, 7]);
        assert_eq!(pixel_rgb(&frame, 2, 0, 1), [8, 9, 10]);
        assert_eq!(pixel_rgb(&frame, 2, 1, 1), [12, 13, 14]);
    }
}
