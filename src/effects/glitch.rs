//! Random chromatic glitch on the page title.

use rand::Rng;

use crate::core::Viewport;
use crate::math::{Color, Vector2};

/// Element the glitch applies to.
pub const TITLE_SELECTOR: &str = ".logo h1";
/// Interval between glitch rolls.
pub const GLITCH_TICK_MS: i32 = 100;
/// Chance that a roll glitches.
pub const GLITCH_CHANCE: f64 = 0.05;
/// How long a glitch stays before the resting shadow returns.
pub const GLITCH_RESET_MS: f64 = 50.0;
/// Title shadow between glitches.
pub const RESTING_SHADOW: &str = "0 0 60px rgba(247, 66, 111, 0.5)";

const SHADOW_COLORS: [u32; 2] = [0xf7426f, 0x00d9c0];

/// Maximum total offset spread; halved on narrow screens.
pub fn glitch_amplitude(viewport: &Viewport) -> f32 {
    if viewport.class().is_narrow() {
        5.0
    } else {
        10.0
    }
}

/// Two colored shadow copies pushed off the title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchShadow {
    /// Offset of each copy, in pixels.
    pub offsets: [Vector2; 2],
}

impl GlitchShadow {
    /// Roll one tick. `None` leaves the title alone.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Option<Self> {
        if !rng.gen_bool(GLITCH_CHANCE) {
            return None;
        }
        let amp = glitch_amplitude(viewport);
        let mut offset = || {
            Vector2::new(
                rng.gen::<f32>() * amp - amp / 2.0,
                rng.gen::<f32>() * amp - amp / 2.0,
            )
        };
        Some(Self {
            offsets: [offset(), offset()],
        })
    }

    /// CSS `text-shadow` value.
    pub fn text_shadow(&self) -> String {
        self.offsets
            .iter()
            .zip(SHADOW_COLORS)
            .map(|(o, hex)| format!("{}px {}px 0 {}", o.x, o.y, Color::from_hex(hex).to_css_hex()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_amplitude_by_width() {
        assert_eq!(glitch_amplitude(&Viewport::new(767.0, 900.0)), 5.0);
        assert_eq!(glitch_amplitude(&Viewport::new(768.0, 900.0)), 10.0);
    }

    #[test]
    fn test_glitches_are_rare_and_bounded() {
        let mut rng = SmallRng::seed_from_u64(3);
        let viewport = Viewport::new(1280.0, 800.0);
        let mut hits = 0;
        for _ in 0..20_000 {
            if let Some(shadow) = GlitchShadow::roll(&mut rng, &viewport) {
                hits += 1;
                for o in shadow.offsets {
                    assert!((-5.0..5.0).contains(&o.x));
                    assert!((-5.0..5.0).contains(&o.y));
                }
            }
        }
        assert!((600..1400).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_text_shadow_format() {
        let shadow = GlitchShadow {
            offsets: [Vector2::new(1.5, -2.0), Vector2::new(0.0, 3.0)],
        };
        assert_eq!(
            shadow.text_shadow(),
            "1.5px -2px 0 #f7426f, 0px 3px 0 #00d9c0"
        );
    }
}
