#![doc = r#"
riskpm library crate: a miniature tile-and-sprite picture machine.

One packed memory region (tiles, sprites, palettes, tilemap) is composited
into an RGBA framebuffer every frame, driven by two external cadences: the
frame clock (`Machine::advance_frame`) and independent palette-noise timers
(`Machine::tick_palette`).

Modules:
- vram: the packed memory region, its typed views and the masking mutation API
- tile: 8x8 1-bpp tiles and per-pixel bit decode
- palette: two-color palette words and RGB332 channel expansion
- sprite: packed 32-bit sprite attribute words and the layer-mode enum
- map: packed background map cell bytes
- renderer: the two-pass compositor writing the RGBA framebuffer
- anim: per-frame bob/blink updates and per-interval palette randomization
- machine: the engine context owning VRAM, renderer and animator
- cartridge: RPM1 memory-image blobs; loader and builder
- assets: the stock demo content as a built RPM1 image
- display (feature `display`): winit window + pixels surface host glue

In tests, shared fixtures are available under `crate::test_utils`.
"#]

pub mod anim;
pub mod assets;
pub mod cartridge;
pub mod machine;
pub mod map;
pub mod palette;
pub mod renderer;
pub mod sprite;
pub mod tile;
pub mod vram;

#[cfg(feature = "display")]
pub mod display;

// Re-export commonly used types at the crate root for convenience.
pub use anim::{AnimParams, Animator, PALETTE_TICK_PERIODS_MS};
pub use cartridge::{Cartridge, CartridgeBuilder};
pub use machine::Machine;
pub use sprite::{LayerMode, SpriteAttr};
pub use vram::{Vram, VramLayout};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
