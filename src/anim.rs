/*!
Animation driver: the two update families that mutate VRAM between frames.

Purpose:
- `advance` is the per-frame family: bob the text sprites on a sine wave
  and, every `blink_interval` frames, flip their layer-mode bits and invert
  the blink palette word.
- `randomize_palette` is the per-interval family: overwrite one palette
  word with uniform random bits. The caller owns the cadence; the stock
  periods per slot are `PALETTE_TICK_PERIODS_MS`.

Notes:
- Sprite updates are read-modify-write on the packed word: tile, palette
  and x survive, layer-mode and y are replaced.
- Blink XOR pairs the modes opaque/disabled and back/front, so text drawn
  with alternating back/front swaps polarity on every toggle.
*/

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::palette::Palette;
use crate::sprite::LayerMode;
use crate::vram::Vram;

/// Stock palette-noise periods, one per ticked slot, in milliseconds.
/// Deliberately co-prime-ish so the flashes never sync up.
pub const PALETTE_TICK_PERIODS_MS: [u64; 4] = [532, 1333, 167, 269];

/// Tunables for the per-frame family. The defaults reproduce the stock
/// demo: four text sprites bobbing around y=40, blinking every 40 frames.
#[derive(Copy, Clone, Debug)]
pub struct AnimParams {
    /// Sprite slots `0..text_slots` are animated as bobbing text.
    pub text_slots: usize,
    /// Baseline y the bob oscillates around.
    pub center_y: u8,
    /// Peak vertical displacement in pixels.
    pub amplitude: f64,
    /// Milliseconds per radian of bob phase. Must be positive.
    pub period_ms: f64,
    /// Blink every this many frames; 0 disables blinking.
    pub blink_interval: u64,
    /// Palette slot whose word is inverted on each blink.
    pub blink_palette: usize,
}

impl Default for AnimParams {
    fn default() -> Self {
        AnimParams {
            text_slots: 4,
            center_y: 40,
            amplitude: 6.0,
            period_ms: 200.0,
            blink_interval: 40,
            blink_palette: 4,
        }
    }
}

/// Owns the animation state: frame counter, accumulated time, and the RNG
/// feeding palette randomization.
pub struct Animator {
    params: AnimParams,
    frame: u64,
    elapsed_ms: f64,
    rng: SmallRng,
}

impl Animator {
    pub fn new(params: AnimParams) -> Self {
        Animator {
            params,
            frame: 0,
            elapsed_ms: 0.0,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Like `new` but with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(params: AnimParams, seed: u64) -> Self {
        Animator {
            params,
            frame: 0,
            elapsed_ms: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> AnimParams {
        self.params
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Per-frame update. Advances the clock by `dt`, bobs each text sprite
    /// to `center + round(amplitude * sin(elapsed/period + slot))`, and on
    /// every `blink_interval`-th frame XORs the text sprites' layer bits
    /// with 0b11 and the blink palette word with 0xFFFF.
    pub fn advance(&mut self, vram: &mut Vram, dt: Duration) {
        self.elapsed_ms += dt.as_secs_f64() * 1000.0;
        self.frame += 1;
        let blink =
            self.params.blink_interval != 0 && self.frame % self.params.blink_interval == 0;

        for slot in 0..self.params.text_slots {
            let attr = vram.sprite(slot);
            let phase = self.elapsed_ms / self.params.period_ms + slot as f64;
            let bob = self.params.center_y as f64 + self.params.amplitude * phase.sin();
            let mut next = attr.with_y(bob.round().clamp(0.0, 255.0) as u8);
            if blink {
                next = next.with_layer(LayerMode::from_bits(next.layer().bits() ^ 0b11));
            }
            vram.set_sprite(slot, next);
        }

        if blink {
            let word = vram.palette(self.params.blink_palette).word();
            vram.set_palette(self.params.blink_palette, Palette::from_word(word ^ 0xFFFF));
        }
    }

    /// Per-interval update: overwrite palette `slot` with a uniformly
    /// random 16-bit word.
    pub fn randomize_palette(&mut self, vram: &mut Vram, slot: usize) {
        vram.set_palette(slot, Palette::from_word(self.rng.random::<u16>()));
    }
}

impl Default for Animator {
    fn default() -> Self {
        Animator::new(AnimParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vram::VramLayout;

    fn text_vram() -> Vram {
        let mut vram = Vram::new(VramLayout::default());
        // Four text sprites the way the demo seeds them, plus one bystander.
        vram.put_sprite(0, 4, 4, 32, 40, LayerMode::Front);
        vram.put_sprite(1, 5, 4, 40, 40, LayerMode::Back);
        vram.put_sprite(2, 6, 4, 48, 40, LayerMode::Front);
        vram.put_sprite(3, 2, 4, 56, 40, LayerMode::Back);
        vram.put_sprite(4, 0, 2, 60, 60, LayerMode::Opaque);
        vram
    }

    fn expected_bob(params: &AnimParams, elapsed_ms: f64, slot: usize) -> u8 {
        let phase = elapsed_ms / params.period_ms + slot as f64;
        (params.center_y as f64 + params.amplitude * phase.sin()).round() as u8
    }

    #[test]
    fn bob_tracks_the_sine_per_slot() {
        let params = AnimParams::default();
        let mut anim = Animator::with_seed(params, 1);
        let mut vram = text_vram();
        let mut elapsed = 0.0;
        for step in 1..=5 {
            let dt = 16.0 * step as f64;
            elapsed += dt;
            anim.advance(&mut vram, Duration::from_secs_f64(dt / 1000.0));
            for slot in 0..params.text_slots {
                assert_eq!(
                    vram.sprite(slot).y(),
                    expected_bob(&params, elapsed, slot),
                    "slot {slot} after {elapsed}ms"
                );
            }
        }
    }

    #[test]
    fn bob_peaks_at_quarter_period() {
        // elapsed/period == pi/2 puts slot 0 at the crest: center + amplitude.
        let params = AnimParams::default();
        let mut anim = Animator::with_seed(params, 1);
        let mut vram = text_vram();
        let dt_ms = params.period_ms * std::f64::consts::FRAC_PI_2;
        anim.advance(&mut vram, Duration::from_secs_f64(dt_ms / 1000.0));
        assert_eq!(vram.sprite(0).y(), 46);
    }

    #[test]
    fn advance_preserves_tile_palette_and_x() {
        let mut anim = Animator::with_seed(AnimParams::default(), 1);
        let mut vram = text_vram();
        for _ in 0..50 {
            anim.advance(&mut vram, Duration::from_millis(16));
        }
        let attr = vram.sprite(2);
        assert_eq!(attr.tile_id(), 6);
        assert_eq!(attr.palette_id(), 4);
        assert_eq!(attr.x(), 48);
        // Slots past text_slots are never touched by the per-frame family.
        let bystander = vram.sprite(4);
        assert_eq!((bystander.x(), bystander.y()), (60, 60));
    }

    #[test]
    fn blink_fires_on_exact_interval_multiples() {
        let params = AnimParams {
            blink_interval: 3,
            ..AnimParams::default()
        };
        let mut anim = Animator::with_seed(params, 1);
        let mut vram = text_vram();
        vram.set_palette(4, Palette::from_word(0x1234));

        anim.advance(&mut vram, Duration::from_millis(16));
        anim.advance(&mut vram, Duration::from_millis(16));
        assert_eq!(vram.sprite(0).layer(), LayerMode::Front);
        assert_eq!(vram.palette(4).word(), 0x1234);

        // Third frame: layer bits flip and the blink palette inverts.
        anim.advance(&mut vram, Duration::from_millis(16));
        assert_eq!(vram.sprite(0).layer(), LayerMode::Back);
        assert_eq!(vram.sprite(1).layer(), LayerMode::Front);
        assert_eq!(vram.palette(4).word(), !0x1234);

        // Sixth frame: everything toggles back.
        for _ in 0..3 {
            anim.advance(&mut vram, Duration::from_millis(16));
        }
        assert_eq!(vram.sprite(0).layer(), LayerMode::Front);
        assert_eq!(vram.palette(4).word(), 0x1234);
    }

    #[test]
    fn zero_blink_interval_never_blinks() {
        let params = AnimParams {
            blink_interval: 0,
            ..AnimParams::default()
        };
        let mut anim = Animator::with_seed(params, 1);
        let mut vram = text_vram();
        vram.set_palette(4, Palette::from_word(0xBEEF));
        for _ in 0..100 {
            anim.advance(&mut vram, Duration::from_millis(16));
        }
        assert_eq!(vram.sprite(0).layer(), LayerMode::Front);
        assert_eq!(vram.palette(4).word(), 0xBEEF);
    }

    #[test]
    fn randomize_palette_is_seed_deterministic() {
        let mut a = Animator::with_seed(AnimParams::default(), 99);
        let mut b = Animator::with_seed(AnimParams::default(), 99);
        let mut vram_a = Vram::new(VramLayout::default());
        let mut vram_b = Vram::new(VramLayout::default());
        for _ in 0..8 {
            a.randomize_palette(&mut vram_a, 2);
            b.randomize_palette(&mut vram_b, 2);
            assert_eq!(vram_a.palette(2).word(), vram_b.palette(2).word());
        }
        // Only the named slot changes.
        assert_eq!(vram_a.palette(3).word(), 0);
    }
}
