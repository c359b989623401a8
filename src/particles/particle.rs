//! A single ambient particle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::FieldConfig;
use crate::math::{Color, Vector2};

/// Outline a particle is drawn with. Fixed for the particle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Filled circle of radius `size`.
    Circle,
    /// Filled upward triangle inscribed in the `2 * size` square.
    Triangle,
    /// Filled square of side `2 * size`.
    Square,
}

impl ShapeKind {
    /// All shapes, in spawn-roll order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square];

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Particle state. Owned exclusively by its [`ParticleField`](super::ParticleField).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center in canvas pixels.
    pub position: Vector2,
    /// Displacement per frame.
    pub velocity: Vector2,
    /// Radius / half-width.
    pub size: f32,
    /// Current alpha.
    pub opacity: f32,
    /// Fill color.
    pub color: Color,
    /// Drawn outline.
    pub shape: ShapeKind,
}

impl Particle {
    /// Construct a particle somewhere inside the canvas.
    ///
    /// Unlike [`reset`](Self::reset) the height is randomized too, so the first
    /// frame has no empty band at the top.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Vector2, config: &FieldConfig) -> Self {
        let mut particle = Self {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            size: config.size.min,
            opacity: 0.0,
            color: Color::WHITE,
            shape: ShapeKind::Circle,
        };
        particle.reset(rng, bounds, config);
        particle.position.y = rng.gen::<f32>() * bounds.y;
        particle
    }

    /// Re-roll every attribute and move the particle just above the canvas.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Vector2, config: &FieldConfig) {
        self.position = Vector2::new(rng.gen::<f32>() * bounds.x, -config.margin);
        self.size = config.size.sample(rng);
        self.velocity = Vector2::new(config.speed_x.sample(rng), config.speed_y.sample(rng));
        self.opacity = config.initial_opacity.sample(rng);
        self.color = if config.palette.is_empty() {
            Color::WHITE
        } else {
            config.palette[rng.gen_range(0..config.palette.len())]
        };
        self.shape = ShapeKind::random(rng);
    }

    /// Advance one frame. Returns `true` when the particle was recycled.
    ///
    /// Afterwards `y` lies in `[-margin, height + margin]`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: Vector2,
        config: &FieldConfig,
        phase: f32,
    ) -> bool {
        self.position += self.velocity;

        if self.position.x < 0.0 {
            self.position.x = bounds.x;
        } else if self.position.x > bounds.x {
            self.position.x = 0.0;
        }

        let mut recycled = false;
        if self.position.y > bounds.y + config.margin {
            self.reset(rng, bounds, config);
            recycled = true;
        } else if self.position.y < -config.margin {
            // Only reachable after a pointer push above the top edge.
            self.position.y = -config.margin;
        }

        self.opacity = shimmer(self.position.x, phase, config);
        recycled
    }

    /// Vertices of the upward triangle: apex, bottom-left, bottom-right.
    pub fn triangle(&self) -> [Vector2; 3] {
        let Vector2 { x, y } = self.position;
        let s = self.size;
        [
            Vector2::new(x, y - s),
            Vector2::new(x - s, y + s),
            Vector2::new(x + s, y + s),
        ]
    }
}

/// Opacity at horizontal position `x` for the given phase time.
#[inline]
pub fn shimmer(x: f32, phase: f32, config: &FieldConfig) -> f32 {
    config.opacity_base + (phase + x).sin() * config.opacity_amplitude
}
