//! Tunables for the particle field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{BackdropError, RESIZE_DEBOUNCE_MS};
use crate::math::{palette, Color};

/// Half-open range `[min, max)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive lower bound.
    pub min: f32,
    /// Exclusive upper bound.
    pub max: f32,
}

impl Span {
    /// Create a span.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a value from the span. A degenerate span always yields `min`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    /// Whether `value` lies in the span.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Time base for the opacity shimmer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseSource {
    /// Seconds of real elapsed time. Frame drops do not slow the shimmer.
    #[default]
    WallClock,
    /// A fixed step per rendered frame. Output is reproducible for a given seed.
    FrameCount {
        /// Phase advance per frame, in seconds.
        frame_secs: f32,
    },
}

/// Complete particle field configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Distance beyond the canvas edge where particles spawn and recycle.
    pub margin: f32,
    /// Downward speed per frame.
    pub speed_y: Span,
    /// Sideways drift per frame.
    pub speed_x: Span,
    /// Particle radius / half-width.
    pub size: Span,
    /// Opacity assigned at spawn, before the first update.
    pub initial_opacity: Span,
    /// Midpoint of the opacity shimmer.
    pub opacity_base: f32,
    /// Amplitude of the opacity shimmer.
    pub opacity_amplitude: f32,
    /// Colors a particle may take.
    pub palette: Vec<Color>,
    /// Color painted over the canvas each frame.
    pub trail_color: Color,
    /// Alpha of the trail paint; lower leaves longer trails.
    pub trail_alpha: f32,
    /// Connection line color.
    pub connection_color: Color,
    /// Connection line alpha at zero distance.
    pub connection_max_alpha: f32,
    /// Connection line width in pixels.
    pub connection_width: f32,
    /// Pointer displacement at zero distance, in pixels.
    pub repulsion_strength: f32,
    /// Time base for the opacity shimmer.
    pub phase: PhaseSource,
    /// Resize debounce delay in milliseconds.
    pub resize_debounce_ms: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            speed_y: Span::new(0.2, 0.7),
            speed_x: Span::new(-0.15, 0.15),
            size: Span::new(1.0, 4.0),
            initial_opacity: Span::new(0.2, 0.7),
            opacity_base: 0.3,
            opacity_amplitude: 0.2,
            palette: palette(),
            trail_color: Color::from_rgb_bytes(10, 10, 10),
            trail_alpha: 0.05,
            connection_color: Color::from_hex(0xf7426f),
            connection_max_alpha: 0.15,
            connection_width: 1.0,
            repulsion_strength: 3.0,
            phase: PhaseSource::WallClock,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl FieldConfig {
    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deterministic variant used for replay and tests.
    pub fn deterministic() -> Self {
        Self {
            phase: PhaseSource::FrameCount {
                frame_secs: 1.0 / 60.0,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_span_samples_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let span = Span::new(0.2, 0.7);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = FieldConfig::from_json(r##"{ "trail_alpha": 0.1, "palette": ["#ffffff"] }"##)
            .unwrap();
        assert_eq!(cfg.trail_alpha, 0.1);
        assert_eq!(cfg.palette.len(), 1);
        assert_eq!(cfg.margin, 10.0);
        assert_eq!(cfg.phase, PhaseSource::WallClock);
    }

    #[test]
    fn test_phase_source_json() {
        let cfg = FieldConfig::from_json(
            r#"{ "phase": { "kind": "frame_count", "frame_secs": 0.02 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.phase, PhaseSource::FrameCount { frame_secs: 0.02 });
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = FieldConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BackdropError::Config(_)));
    }
}
