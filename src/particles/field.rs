//! The particle field: a viewport-sized pool of particles.

use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::forces::Repulsor;
use super::particle::Particle;
use crate::core::{Viewport, MAX_PARTICLES};
use crate::math::{lerp, Vector2};

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle.
    pub a: usize,
    /// Index of the second particle (`b > a`).
    pub b: usize,
    /// Distance between them.
    pub distance: f32,
    /// Line alpha.
    pub opacity: f32,
}

/// Alpha of a connection line, or `None` at or beyond the threshold.
///
/// Falls linearly from `max_alpha` at zero distance to 0 at `threshold`.
#[inline]
pub fn connection_opacity(distance: f32, threshold: f32, max_alpha: f32) -> Option<f32> {
    if distance < threshold {
        Some(lerp(max_alpha, 0.0, distance / threshold))
    } else {
        None
    }
}

/// Count changes produced by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// Particle count before the resize.
    pub previous: usize,
    /// Particle count after the resize.
    pub current: usize,
}

/// Owns every particle and the RNG that rolls them.
///
/// The collection is a fixed-capacity pool: recycled particles are reset in
/// place, and only a shrinking viewport drops particles (from the end).
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vector2,
    config: FieldConfig,
    rng: SmallRng,
}

impl ParticleField {
    /// Build a field sized for `viewport`.
    pub fn new(viewport: &Viewport, config: FieldConfig, rng: SmallRng) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            bounds: Vector2::new(viewport.width, viewport.height),
            config,
            rng,
        };
        field.fill_to(viewport.particle_count());
        field
    }

    /// Current particles, in pool order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Canvas size the field animates within.
    #[inline]
    pub fn bounds(&self) -> Vector2 {
        self.bounds
    }

    /// Field configuration.
    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Adopt a new viewport: new bounds, then grow or truncate to its count.
    ///
    /// Particles that stay keep their full state.
    pub fn resize(&mut self, viewport: &Viewport) -> ResizeOutcome {
        let previous = self.particles.len();
        self.bounds = Vector2::new(viewport.width, viewport.height);
        let target = viewport.particle_count();
        if target > previous {
            self.fill_to(target);
        } else {
            self.particles.truncate(target);
        }
        ResizeOutcome {
            previous,
            current: self.particles.len(),
        }
    }

    /// Advance every particle one frame. Returns how many were recycled.
    pub fn update(&mut self, phase: f32) -> usize {
        let mut recycled = 0;
        for particle in &mut self.particles {
            if particle.update(&mut self.rng, self.bounds, &self.config, phase) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Every unordered pair closer than `threshold`.
    ///
    /// Quadratic in particle count; the viewport buckets keep that bounded.
    pub fn connections(&self, threshold: f32) -> impl Iterator<Item = Connection> + '_ {
        let max_alpha = self.config.connection_max_alpha;
        let threshold_sq = threshold * threshold;
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |a| {
            ((a + 1)..particles.len()).filter_map(move |b| {
                let pa = particles[a].position;
                let pb = particles[b].position;
                if pa.distance_to_squared(&pb) >= threshold_sq {
                    return None;
                }
                let distance = pa.distance_to(&pb);
                connection_opacity(distance, threshold, max_alpha).map(|opacity| Connection {
                    a,
                    b,
                    distance,
                    opacity,
                })
            })
        })
    }

    /// Push particles away from `pointer`. Returns how many moved.
    pub fn repel(&mut self, pointer: Vector2, repulsor: &Repulsor) -> usize {
        let mut moved = 0;
        for particle in &mut self.particles {
            if let Some(offset) = repulsor.displacement(pointer, particle.position) {
                particle.position += offset;
                moved += 1;
            }
        }
        moved
    }

    fn fill_to(&mut self, target: usize) {
        while self.particles.len() < target {
            let particle = Particle::spawn(&mut self.rng, self.bounds, &self.config);
            self.particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field(width: f32, height: f32) -> ParticleField {
        ParticleField::new(
            &Viewport::new(width, height),
            FieldConfig::deterministic(),
            SmallRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_initial_count_matches_bucket() {
        for (width, expected) in [(320.0, 30), (600.0, 40), (900.0, 60), (1920.0, 100)] {
            assert_eq!(field(width, 800.0).len(), expected);
        }
    }

    #[test]
    fn test_y_stays_in_band_after_updates() {
        let mut f = field(1024.0, 300.0);
        for frame in 0..2000 {
            f.update(frame as f32 / 60.0);
            for p in f.particles() {
                assert!(p.position.y >= -10.0 && p.position.y <= 310.0);
            }
        }
    }

    #[test]
    fn test_pushed_above_top_is_clamped() {
        let mut f = field(1024.0, 300.0);
        f.particles[0].position.y = -14.0;
        f.update(0.0);
        assert!(f.particles()[0].position.y >= -10.0);
    }

    #[test]
    fn test_connection_predicate() {
        let mut f = field(1024.0, 800.0);
        let threshold = 150.0;
        let found: Vec<(usize, usize)> = f.connections(threshold).map(|c| (c.a, c.b)).collect();
        for a in 0..f.len() {
            for b in (a + 1)..f.len() {
                let d = f.particles()[a].position.distance_to(&f.particles()[b].position);
                assert_eq!(found.contains(&(a, b)), d < threshold, "pair {} {}", a, b);
            }
        }

        f.particles[0].position = Vector2::new(10.0, 10.0);
        f.particles[1].position = Vector2::new(10.0 + threshold, 10.0);
        assert!(!f.connections(threshold).any(|c| c.a == 0 && c.b == 1));
    }

    #[test]
    fn test_connection_opacity_decreases_to_zero() {
        let mut last = f32::INFINITY;
        for step in 0..100 {
            let d = step as f32;
            let o = connection_opacity(d, 100.0, 0.15).unwrap();
            assert!(o < last);
            last = o;
        }
        assert_eq!(connection_opacity(0.0, 100.0, 0.15), Some(0.15));
        assert!(connection_opacity(99.999, 100.0, 0.15).unwrap() < 1e-5);
        assert_eq!(connection_opacity(100.0, 100.0, 0.15), None);
    }

    #[test]
    fn test_grow_keeps_existing_particles() {
        let mut f = field(500.0, 800.0);
        let before = f.particles().to_vec();
        let outcome = f.resize(&Viewport::new(1100.0, 800.0));
        assert_eq!(outcome, ResizeOutcome { previous: 40, current: 100 });
        assert_eq!(&f.particles()[..40], &before[..]);
        assert_eq!(f.bounds(), Vector2::new(1100.0, 800.0));
    }

    #[test]
    fn test_shrink_truncates_from_end() {
        let mut f = field(1024.0, 800.0);
        let before = f.particles().to_vec();
        let outcome = f.resize(&Viewport::new(400.0, 800.0));
        assert_eq!(outcome.current, 30);
        assert_eq!(f.particles(), &before[..30]);
    }

    #[test]
    fn test_same_bucket_resize_keeps_count() {
        let mut f = field(1200.0, 800.0);
        let outcome = f.resize(&Viewport::new(1600.0, 900.0));
        assert_eq!(outcome.previous, outcome.current);
    }

    #[test]
    fn test_repel_moves_only_nearby() {
        let mut f = field(1024.0, 800.0);
        for (i, p) in f.particles.iter_mut().enumerate() {
            p.position = Vector2::new(1000.0, i as f32 * 5.0);
        }
        f.particles[0].position = Vector2::new(100.0, 100.0);
        let moved = f.repel(Vector2::new(150.0, 100.0), &Repulsor::new(150.0, 3.0));
        assert_eq!(moved, 1);
        let p = f.particles()[0].position;
        assert!((p.x - 98.0).abs() < 1e-4);
        assert!((p.y - 100.0).abs() < 1e-4);
    }
}
