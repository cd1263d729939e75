/*!
Compositor: turns packed memory into an RGBA framebuffer.

Purpose:
- `render_frame` runs two ordered passes over VRAM, map first then sprites,
  writing straight into the owned framebuffer.
- The map pass repaints the full surface every frame (RGB only; alpha is
  prefilled at creation and never touched again by this pass).
- The sprite pass walks slots in ascending order, honors the layer-mode
  transparency mask, and clips per pixel at the surface edge.

Notes:
- Rendering unchanged VRAM twice produces bit-identical framebuffers.
- A sprite word naming a tile or palette beyond the layout's counts is a
  programming error and panics inside the VRAM accessor it reaches.
*/

use crate::palette::rgb332_to_rgb;
use crate::tile::{TILE_HEIGHT, TILE_WIDTH};
use crate::vram::Vram;

pub const BYTES_PER_PIXEL: usize = 4;

/// Owns the output surface. Width and height are fixed at creation;
/// sprites positioned past the edge are clipped, never wrapped.
pub struct Renderer {
    width: usize,
    height: usize,
    framebuffer: Vec<u8>,
}

impl Renderer {
    /// Allocate a `width` x `height` RGBA surface with every alpha byte
    /// prefilled 0xFF. Color bytes start at zero until the first frame.
    pub fn new(width: usize, height: usize) -> Self {
        let mut framebuffer = vec![0u8; width * height * BYTES_PER_PIXEL];
        for pixel in framebuffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[3] = 0xFF;
        }
        Renderer {
            width,
            height,
            framebuffer,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The finished surface, `width * height * 4` bytes, row-major RGBA.
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// Composite one frame: full map repaint, then the sprite overlay.
    pub fn render_frame(&mut self, vram: &Vram) {
        self.draw_map(vram);
        self.draw_sprites(vram);
    }

    fn draw_map(&mut self, vram: &Vram) {
        let layout = vram.layout();
        for row in 0..layout.map_rows {
            for col in 0..layout.map_cols {
                let cell = vram.map_cell(row, col);
                let tile = vram.tile(cell.tile_id() as usize);
                let palette = vram.palette(cell.palette_id() as usize);
                let base_x = col * TILE_WIDTH;
                let base_y = row * TILE_HEIGHT;
                for ty in 0..TILE_HEIGHT {
                    let py = base_y + ty;
                    if py >= self.height {
                        continue;
                    }
                    for tx in 0..TILE_WIDTH {
                        let px = base_x + tx;
                        if px >= self.width {
                            continue;
                        }
                        let bit = tile.pixel(tx, ty);
                        let [r, g, b] = rgb332_to_rgb(palette.color(bit));
                        let fi = (py * self.width + px) * BYTES_PER_PIXEL;
                        self.framebuffer[fi] = r;
                        self.framebuffer[fi + 1] = g;
                        self.framebuffer[fi + 2] = b;
                        // alpha stays at the prefilled 0xFF
                    }
                }
            }
        }
    }

    fn draw_sprites(&mut self, vram: &Vram) {
        let layout = vram.layout();
        for slot in 0..layout.sprite_count {
            let attr = vram.sprite(slot);
            if attr.is_disabled() {
                continue;
            }
            let layer = attr.layer();
            let tile = vram.tile(attr.tile_id() as usize);
            let palette = vram.palette(attr.palette_id() as usize);
            let base_x = attr.x() as usize;
            let base_y = attr.y() as usize;
            for ty in 0..TILE_HEIGHT {
                let py = base_y + ty;
                if py >= self.height {
                    continue;
                }
                for tx in 0..TILE_WIDTH {
                    let px = base_x + tx;
                    if px >= self.width {
                        continue;
                    }
                    let bit = tile.pixel(tx, ty);
                    if layer.masks_bit(bit) {
                        continue; // transparent
                    }
                    let [r, g, b] = rgb332_to_rgb(palette.color(bit));
                    let fi = (py * self.width + px) * BYTES_PER_PIXEL;
                    self.framebuffer[fi] = r;
                    self.framebuffer[fi + 1] = g;
                    self.framebuffer[fi + 2] = b;
                    self.framebuffer[fi + 3] = 0xFF;
                }
            }
        }
    }
}
