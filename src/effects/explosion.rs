//! Layout of the button-triggered explosion transition.

use rand::Rng;

use crate::core::Viewport;
use crate::math::{consts::TWO_PI, Color, Vector2};

/// Shockwave rings spawned per explosion.
pub const SHOCKWAVE_COUNT: usize = 4;
/// How long the page shakes.
pub const SHAKE_MS: f64 = 500.0;
/// When the explosion elements are removed.
pub const CLEANUP_MS: f64 = 1500.0;
/// When the page navigates to the registration form.
pub const REDIRECT_DELAY_MS: f64 = 1500.0;

/// One flying fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstParticle {
    /// Final offset from the burst center, in pixels.
    pub offset: Vector2,
    /// Fill color.
    pub color: Color,
    /// Edge length in pixels.
    pub size: f32,
}

/// Fragments of one explosion, spread evenly around the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionBurst {
    /// Fragments in angle order.
    pub particles: Vec<BurstParticle>,
}

impl ExplosionBurst {
    /// Lay out a burst for the given viewport.
    pub fn layout<R: Rng + ?Sized>(viewport: &Viewport, palette: &[Color], rng: &mut R) -> Self {
        let narrow = viewport.class().is_narrow();
        let count = if narrow { 25 } else { 40 };
        let reach = if narrow { 150.0 } else { 200.0 };

        let particles = (0..count)
            .map(|i| {
                let angle = TWO_PI * i as f32 / count as f32;
                let distance = reach + rng.gen::<f32>() * 300.0;
                let color = if palette.is_empty() {
                    Color::WHITE
                } else {
                    palette[rng.gen_range(0..palette.len())]
                };
                BurstParticle {
                    offset: Vector2::from_angle(angle) * distance,
                    color,
                    size: 4.0 + rng.gen::<f32>() * 8.0,
                }
            })
            .collect();

        Self { particles }
    }

    /// Number of fragments.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the burst has no fragments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::palette;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_follows_breakpoint() {
        let mut rng = SmallRng::seed_from_u64(3);
        let colors = palette();
        assert_eq!(ExplosionBurst::layout(&Viewport::new(500.0, 900.0), &colors, &mut rng).len(), 25);
        assert_eq!(ExplosionBurst::layout(&Viewport::new(1200.0, 900.0), &colors, &mut rng).len(), 40);
    }

    #[test]
    fn test_fragment_reach_and_size() {
        let mut rng = SmallRng::seed_from_u64(4);
        let colors = palette();
        let burst = ExplosionBurst::layout(&Viewport::new(1200.0, 900.0), &colors, &mut rng);
        for (i, p) in burst.particles.iter().enumerate() {
            let d = p.offset.length();
            assert!(d >= 200.0 - 1e-3 && d < 500.0 + 1e-3);
            assert!((4.0..12.0).contains(&p.size));
            assert!(colors.contains(&p.color));
            let expected = TWO_PI * i as f32 / 40.0;
            let angle = p.offset.angle().rem_euclid(TWO_PI);
            assert!((angle - expected).abs() < 1e-3 || (angle - expected).abs() > TWO_PI - 1e-3);
        }
    }
}
