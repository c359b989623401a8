//! Pointer repulsion.

use crate::core::Viewport;
use crate::math::Vector2;

/// Pushes particles away from the pointer.
///
/// The push is a one-shot displacement applied on each pointer move; it does
/// not change particle velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsor {
    /// Effect radius in pixels.
    pub radius: f32,
    /// Displacement at zero distance, in pixels.
    pub strength: f32,
}

impl Repulsor {
    /// Create a repulsor.
    pub fn new(radius: f32, strength: f32) -> Self {
        Self { radius, strength }
    }

    /// Repulsor sized for the current viewport class.
    pub fn for_viewport(viewport: &Viewport, strength: f32) -> Self {
        Self::new(viewport.repulsion_radius(), strength)
    }

    /// Linear falloff: 1 at the pointer, 0 at the radius.
    #[inline]
    pub fn falloff(&self, distance: f32) -> f32 {
        (self.radius - distance) / self.radius
    }

    /// Displacement for a particle at `particle`, or `None` outside the radius.
    pub fn displacement(&self, pointer: Vector2, particle: Vector2) -> Option<Vector2> {
        let toward_pointer = pointer - particle;
        let distance = toward_pointer.length();
        if distance >= self.radius {
            return None;
        }
        let force = self.falloff(distance);
        Some(-Vector2::from_angle(toward_pointer.angle()) * (force * self.strength))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_radius_untouched() {
        let r = Repulsor::new(100.0, 3.0);
        assert!(r
            .displacement(Vector2::ZERO, Vector2::new(100.0, 0.0))
            .is_none());
        assert!(r
            .displacement(Vector2::ZERO, Vector2::new(80.0, 80.0))
            .is_none());
    }

    #[test]
    fn test_magnitude_and_direction() {
        let r = Repulsor::new(150.0, 3.0);
        let pointer = Vector2::new(200.0, 200.0);
        let particle = Vector2::new(230.0, 240.0);
        let d = r.displacement(pointer, particle).unwrap();

        let expected = (150.0 - 50.0) / 150.0 * 3.0;
        assert!((d.length() - expected).abs() < 1e-5);

        let away = particle - pointer;
        let unit = Vector2::new(away.x / 50.0, away.y / 50.0);
        assert!(d.approx_eq(&(unit * expected), 1e-5));
    }

    #[test]
    fn test_radius_follows_viewport() {
        let narrow = Repulsor::for_viewport(&Viewport::new(600.0, 800.0), 3.0);
        let wide = Repulsor::for_viewport(&Viewport::new(1280.0, 800.0), 3.0);
        assert_eq!(narrow.radius, 100.0);
        assert_eq!(wide.radius, 150.0);
    }
}
