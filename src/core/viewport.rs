//! Viewport snapshots and the width buckets derived from them.

use serde::{Deserialize, Serialize};

/// Discrete size class of the viewport, keyed on width in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewportClass {
    /// Narrower than 480px (phones in portrait).
    Compact,
    /// 480px up to 768px.
    Narrow,
    /// 768px up to 1024px.
    Medium,
    /// 1024px and wider.
    Wide,
}

impl ViewportClass {
    /// Classify a viewport width.
    pub fn from_width(width: f32) -> Self {
        if width < 480.0 {
            ViewportClass::Compact
        } else if width < 768.0 {
            ViewportClass::Narrow
        } else if width < 1024.0 {
            ViewportClass::Medium
        } else {
            ViewportClass::Wide
        }
    }

    /// Number of live particles for this class.
    pub fn particle_count(self) -> usize {
        match self {
            ViewportClass::Compact => 30,
            ViewportClass::Narrow => 40,
            ViewportClass::Medium => 60,
            ViewportClass::Wide => 100,
        }
    }

    /// True below the 768px breakpoint.
    #[inline]
    pub fn is_narrow(self) -> bool {
        matches!(self, ViewportClass::Compact | ViewportClass::Narrow)
    }

    /// Maximum distance at which two particles are joined by a line.
    pub fn connection_distance(self) -> f32 {
        if self.is_narrow() {
            100.0
        } else {
            150.0
        }
    }

    /// Radius around the pointer inside which particles are pushed away.
    pub fn repulsion_radius(self) -> f32 {
        if self.is_narrow() {
            100.0
        } else {
            150.0
        }
    }
}

/// Largest particle count any class asks for.
pub const MAX_PARTICLES: usize = 100;

/// A momentary snapshot of the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport snapshot. Negative or non-finite sizes read as zero.
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Size class of this viewport.
    #[inline]
    pub fn class(&self) -> ViewportClass {
        ViewportClass::from_width(self.width)
    }

    /// Target number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.class().particle_count()
    }

    /// Connection line distance threshold.
    #[inline]
    pub fn connection_distance(&self) -> f32 {
        self.class().connection_distance()
    }

    /// Pointer repulsion radius.
    #[inline]
    pub fn repulsion_radius(&self) -> f32 {
        self.class().repulsion_radius()
    }

    /// Whether the viewport is landscape.
    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Canvas pixel dimensions for this viewport.
    #[inline]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let cases = [
            (0.0, 30),
            (479.9, 30),
            (480.0, 40),
            (767.0, 40),
            (768.0, 60),
            (1023.0, 60),
            (1024.0, 100),
            (2560.0, 100),
        ];
        for (width, expected) in cases {
            assert_eq!(
                Viewport::new(width, 800.0).particle_count(),
                expected,
                "width {}",
                width
            );
        }
    }

    #[test]
    fn test_distances_follow_breakpoint() {
        assert_eq!(Viewport::new(767.0, 600.0).connection_distance(), 100.0);
        assert_eq!(Viewport::new(768.0, 600.0).connection_distance(), 150.0);
        assert_eq!(Viewport::new(400.0, 600.0).repulsion_radius(), 100.0);
        assert_eq!(Viewport::new(1440.0, 900.0).repulsion_radius(), 150.0);
    }

    #[test]
    fn test_invalid_sizes_read_as_zero() {
        let v = Viewport::new(f32::NAN, -20.0);
        assert_eq!(v.width, 0.0);
        assert_eq!(v.height, 0.0);
        assert_eq!(v.particle_count(), 30);
    }

    #[test]
    fn test_max_particles_covers_all_classes() {
        for class in [
            ViewportClass::Compact,
            ViewportClass::Narrow,
            ViewportClass::Medium,
            ViewportClass::Wide,
        ] {
            assert!(class.particle_count() <= MAX_PARTICLES);
        }
    }
}
