//! Lightning flash timing.

use rand::Rng;

use crate::math::Color;

/// Wait after page load before the strike schedule begins.
pub const FIRST_STRIKE_DELAY_MS: f64 = 3000.0;

/// What the flash overlay shows after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashState {
    /// Visible with the given tint.
    On {
        /// Tint color.
        color: Color,
        /// Tint alpha.
        alpha: f32,
    },
    /// Hidden, tint kept.
    Off,
    /// Hidden and tint removed.
    Clear,
}

/// One change to the flash overlay, relative to the start of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashStep {
    /// Offset from the start of the sequence.
    pub at_ms: f64,
    /// Overlay state from this point on.
    pub state: FlashState,
}

const ACCENT: u32 = 0xf7426f;

/// The double flicker of a regular strike.
pub fn strike_sequence() -> [FlashStep; 4] {
    let accent = Color::from_hex(ACCENT);
    [
        FlashStep {
            at_ms: 0.0,
            state: FlashState::On {
                color: accent,
                alpha: 0.3,
            },
        },
        FlashStep {
            at_ms: 100.0,
            state: FlashState::Off,
        },
        FlashStep {
            at_ms: 200.0,
            state: FlashState::On {
                color: accent,
                alpha: 0.4,
            },
        },
        FlashStep {
            at_ms: 280.0,
            state: FlashState::Clear,
        },
    ]
}

/// White-out used by the explosion transition.
pub fn explosion_flash_sequence() -> [FlashStep; 3] {
    [
        FlashStep {
            at_ms: 0.0,
            state: FlashState::On {
                color: Color::WHITE,
                alpha: 0.8,
            },
        },
        FlashStep {
            at_ms: 100.0,
            state: FlashState::On {
                color: Color::from_hex(ACCENT),
                alpha: 0.6,
            },
        },
        FlashStep {
            at_ms: 400.0,
            state: FlashState::Clear,
        },
    ]
}

/// Picks the gap before each strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningTimer {
    /// Minimum gap between strikes.
    pub base_delay_ms: f64,
    /// Random extra gap, uniform in `[0, jitter_ms)`.
    pub jitter_ms: f64,
}

impl LightningTimer {
    /// Mobile devices strike less often.
    pub fn for_device(mobile: bool) -> Self {
        Self {
            base_delay_ms: if mobile { 7000.0 } else { 3000.0 },
            jitter_ms: 5000.0,
        }
    }

    /// Gap before the next strike.
    pub fn next_delay_ms<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>() * self.jitter_ms + self.base_delay_ms
    }
}
