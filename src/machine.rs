/*!
Machine: the engine context tying VRAM, compositor and animator together.

Purpose:
- Own all mutable engine state in one place with an explicit lifecycle,
  instead of scattering it across module globals.
- Expose the two scheduling entry points the host drives: `advance_frame`
  for the frame cadence and `tick_palette` for the independent
  palette-noise timers (stock periods in `PALETTE_TICK_PERIODS_MS`).
- Boot from a parsed cartridge, or start blank for direct VRAM authoring.

Notes:
- `advance_frame` runs animation strictly before rasterization, so a frame
  never renders half-updated state.
- Everything is single-threaded; the host serializes the entry points.
*/

use std::time::Duration;

use log::info;

use crate::anim::Animator;
use crate::cartridge::Cartridge;
use crate::renderer::Renderer;
use crate::vram::{Vram, VramLayout};

pub struct Machine {
    vram: Vram,
    renderer: Renderer,
    animator: Animator,
}

impl Machine {
    /// A blank machine with the stock layout: zeroed tiles/palettes/map,
    /// every sprite slot disabled.
    pub fn new() -> Self {
        Machine::with_layout(VramLayout::default())
    }

    pub fn with_layout(layout: VramLayout) -> Self {
        Machine {
            vram: Vram::new(layout),
            renderer: Renderer::new(layout.surface_width(), layout.surface_height()),
            animator: Animator::default(),
        }
    }

    /// Boot a machine sized and seeded by a cartridge image.
    pub fn from_cartridge(cart: &Cartridge) -> Result<Self, String> {
        let mut machine = Machine::with_layout(cart.layout());
        machine.load_cartridge(cart)?;
        Ok(machine)
    }

    /// Replace the memory region with a cartridge's contents and resize the
    /// surface to match its map. Animator state is kept.
    pub fn load_cartridge(&mut self, cart: &Cartridge) -> Result<(), String> {
        let layout = cart.layout();
        self.vram = Vram::from_segments(
            layout,
            cart.tiles(),
            cart.sprites(),
            cart.palettes(),
            cart.map(),
        )?;
        self.renderer = Renderer::new(layout.surface_width(), layout.surface_height());
        info!(
            "machine booted: {} tiles, {} sprites, {} palettes, {}x{} map, {}x{} surface",
            layout.tile_count,
            layout.sprite_count,
            layout.palette_count,
            layout.map_cols,
            layout.map_rows,
            layout.surface_width(),
            layout.surface_height()
        );
        Ok(())
    }

    pub fn set_animator(&mut self, animator: Animator) {
        self.animator = animator;
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    // ----- scheduling entry points -----

    /// Frame cadence: advance the per-frame animation family by `dt`, then
    /// composite the frame. Called once per host refresh.
    pub fn advance_frame(&mut self, dt: Duration) {
        self.animator.advance(&mut self.vram, dt);
        self.renderer.render_frame(&self.vram);
    }

    /// Palette cadence: randomize palette `slot`. Each slot's timer runs on
    /// its own period, independent of the frame clock.
    pub fn tick_palette(&mut self, slot: usize) {
        self.animator.randomize_palette(&mut self.vram, slot);
    }

    /// Composite one frame from the current memory state without touching
    /// animation state.
    pub fn render(&mut self) {
        self.renderer.render_frame(&self.vram);
    }

    // ----- presentation boundary -----

    /// The finished RGBA frame, `width * height * 4` bytes.
    pub fn framebuffer(&self) -> &[u8] {
        self.renderer.framebuffer()
    }

    pub fn width(&self) -> usize {
        self.renderer.width()
    }

    pub fn height(&self) -> usize {
        self.renderer.height()
    }

    // ----- direct memory access -----

    pub fn vram(&self) -> &Vram {
        &self.vram
    }

    pub fn vram_mut(&mut self) -> &mut Vram {
        &mut self.vram
    }

    /// Encode the current framebuffer as an image file; the format follows
    /// the path's extension.
    #[cfg(feature = "screenshot")]
    pub fn save_screenshot<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), String> {
        let frame = image::RgbaImage::from_raw(
            self.renderer.width() as u32,
            self.renderer.height() as u32,
            self.renderer.framebuffer().to_vec(),
        )
        .ok_or_else(|| "framebuffer does not match surface dimensions".to_string())?;
        frame
            .save(path)
            .map_err(|e| format!("failed to write screenshot: {e}"))
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}
