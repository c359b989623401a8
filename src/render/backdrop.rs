//! The particle field renderer.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::surface::DrawSurface;
use crate::core::{Clock, DeviceCapabilities, StaticCapabilities, Viewport};
use crate::math::Vector2;
use crate::particles::{
    FieldConfig, Particle, ParticleField, PhaseSource, Repulsor, ResizeOutcome, ShapeKind,
};

/// Statistics for the most recent frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderInfo {
    /// Frames rendered so far.
    pub frame: u64,
    /// Live particles.
    pub particles: usize,
    /// Particles recycled this frame.
    pub recycled: usize,
    /// Connection lines drawn this frame.
    pub connections: usize,
    /// Primitives issued this frame.
    pub draw_calls: u32,
}

impl RenderInfo {
    /// Reset the per-frame counters and advance the frame number.
    fn begin_frame(&mut self) {
        self.frame += 1;
        self.particles = 0;
        self.recycled = 0;
        self.connections = 0;
        self.draw_calls = 0;
    }
}

/// The single owned renderer context.
///
/// Holds the particle field, the viewport snapshot, device capabilities and
/// frame timing. Nothing else reads or writes particle state.
pub struct Backdrop {
    field: ParticleField,
    viewport: Viewport,
    capabilities: StaticCapabilities,
    clock: Clock,
    info: RenderInfo,
    pointer: Option<Vector2>,
}

impl Backdrop {
    /// Build a renderer for `viewport`, seeding particle rolls with `seed`.
    pub fn new(
        viewport: Viewport,
        config: FieldConfig,
        capabilities: &dyn DeviceCapabilities,
        seed: u64,
    ) -> Self {
        let field = ParticleField::new(&viewport, config, SmallRng::seed_from_u64(seed));
        log::debug!(
            "backdrop {}x{} with {} particles",
            viewport.width,
            viewport.height,
            field.len()
        );
        Self {
            field,
            viewport,
            capabilities: StaticCapabilities::snapshot(capabilities),
            clock: Clock::start_new(),
            info: RenderInfo::default(),
            pointer: None,
        }
    }

    /// Current viewport snapshot.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The particle field.
    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Statistics for the last frame.
    #[inline]
    pub fn info(&self) -> &RenderInfo {
        &self.info
    }

    /// Last pointer position over the canvas.
    #[inline]
    pub fn pointer(&self) -> Option<Vector2> {
        self.pointer
    }

    /// Whether pointer repulsion is enabled on this device.
    #[inline]
    pub fn accepts_pointer(&self) -> bool {
        !self.capabilities.touch_primary
    }

    /// Match the surface's pixel size to the viewport.
    pub fn size_surface<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = self.viewport.canvas_size();
        surface.resize(width, height);
    }

    /// Render one frame timed by the internal clock.
    pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        let now = self.clock.get_elapsed_time();
        self.frame_at(surface, now);
    }

    /// Render one frame at `now_secs`: fade, update, draw, connect.
    pub fn frame_at<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, now_secs: f64) {
        self.info.begin_frame();
        let config = self.field.config();
        let bounds = self.field.bounds();

        surface.fill_rect(Vector2::ZERO, bounds, config.trail_color, config.trail_alpha);
        self.info.draw_calls += 1;

        let phase = match config.phase {
            PhaseSource::WallClock => now_secs as f32,
            PhaseSource::FrameCount { frame_secs } => self.info.frame as f32 * frame_secs,
        };
        self.info.recycled = self.field.update(phase);

        for particle in self.field.particles() {
            draw_particle(surface, particle);
        }
        self.info.particles = self.field.len();
        self.info.draw_calls += self.field.len() as u32;

        let config = self.field.config();
        let particles = self.field.particles();
        for link in self.field.connections(self.viewport.connection_distance()) {
            surface.stroke_line(
                particles[link.a].position,
                particles[link.b].position,
                config.connection_width,
                config.connection_color,
                link.opacity,
            );
            self.info.connections += 1;
        }
        self.info.draw_calls += self.info.connections as u32;
    }

    /// Adopt a new viewport between frames.
    pub fn resize<S: DrawSurface + ?Sized>(
        &mut self,
        viewport: Viewport,
        surface: &mut S,
    ) -> ResizeOutcome {
        self.viewport = viewport;
        self.size_surface(surface);
        let outcome = self.field.resize(&viewport);
        if outcome.previous != outcome.current {
            log::debug!(
                "resized to {}x{}: {} -> {} particles",
                viewport.width,
                viewport.height,
                outcome.previous,
                outcome.current
            );
        }
        outcome
    }

    /// Push nearby particles away from the pointer. Returns how many moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> usize {
        if !self.accepts_pointer() {
            return 0;
        }
        let pointer = Vector2::new(x, y);
        self.pointer = Some(pointer);
        let repulsor = Repulsor::for_viewport(&self.viewport, self.field.config().repulsion_strength);
        self.field.repel(pointer, &repulsor)
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }
}

fn draw_particle<S: DrawSurface + ?Sized>(surface: &mut S, particle: &Particle) {
    let Particle {
        position,
        size,
        color,
        opacity,
        ..
    } = *particle;
    match particle.shape {
        ShapeKind::Circle => surface.fill_circle(position, size, color, opacity),
        ShapeKind::Triangle => surface.fill_polygon(&particle.triangle(), color, opacity),
        ShapeKind::Square => surface.fill_rect(
            position - Vector2::new(size, size),
            Vector2::new(size * 2.0, size * 2.0),
            color,
            opacity,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use crate::render::{DrawCommand, RecordingSurface};

    fn backdrop(width: f32, caps: StaticCapabilities) -> Backdrop {
        Backdrop::new(
            Viewport::new(width, 800.0),
            FieldConfig::deterministic(),
            &caps,
            7,
        )
    }

    #[test]
    fn test_frame_starts_with_trail_fade() {
        let mut b = backdrop(1280.0, StaticCapabilities::desktop());
        let mut surface = RecordingSurface::new();
        b.frame_at(&mut surface, 0.0);
        match &surface.commands()[0] {
            DrawCommand::Rect {
                origin,
                size,
                color,
                alpha,
            } => {
                assert_eq!(*origin, Vector2::ZERO);
                assert_eq!(*size, Vector2::new(1280.0, 800.0));
                assert_eq!(color.to_hex(), 0x0a0a0a);
                assert_eq!(*alpha, 0.05);
            }
            other => panic!("expected trail fade, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_draws_every_particle_then_lines() {
        let mut b = backdrop(1280.0, StaticCapabilities::desktop());
        let mut surface = RecordingSurface::new();
        b.frame_at(&mut surface, 0.0);

        let info = b.info().clone();
        assert_eq!(info.frame, 1);
        assert_eq!(info.particles, 100);
        let shapes = &surface.commands()[1..=100];
        assert!(shapes
            .iter()
            .all(|c| !matches!(c, DrawCommand::Line { .. })));
        assert_eq!(surface.lines().count(), info.connections);
        assert_eq!(surface.commands().len(), 1 + 100 + info.connections);
        assert_eq!(info.draw_calls as usize, surface.commands().len());
    }

    #[test]
    fn test_lines_use_post_update_positions() {
        let mut b = backdrop(1280.0, StaticCapabilities::desktop());
        let mut surface = RecordingSurface::new();
        b.frame_at(&mut surface, 0.0);
        let particles = b.field().particles();
        let threshold = b.viewport().connection_distance();
        for line in surface.lines() {
            if let DrawCommand::Line {
                from,
                to,
                width,
                color,
                alpha,
            } = line
            {
                assert!(particles.iter().any(|p| p.position == *from));
                assert!(particles.iter().any(|p| p.position == *to));
                assert!(from.distance_to(to) < threshold);
                assert_eq!(*width, 1.0);
                assert_eq!(*color, Color::from_hex(0xf7426f));
                assert!(*alpha > 0.0 && *alpha <= 0.15);
            }
        }
    }

    #[test]
    fn test_reduced_motion_still_connects_close_pairs() {
        let caps = StaticCapabilities {
            reduced_motion: true,
            ..StaticCapabilities::desktop()
        };
        let mut b = backdrop(1280.0, caps);
        let mut surface = RecordingSurface::new();
        b.frame_at(&mut surface, 0.0);

        let particles = b.field().particles();
        let threshold = b.viewport().connection_distance();
        let mut close_pairs = 0;
        for (i, a) in particles.iter().enumerate() {
            for other in &particles[i + 1..] {
                if a.position.distance_to(&other.position) < threshold {
                    close_pairs += 1;
                }
            }
        }
        assert!(close_pairs > 0);
        assert_eq!(surface.lines().count(), close_pairs);
        assert_eq!(b.info().connections, close_pairs);
    }

    #[test]
    fn test_frame_count_phase_is_reproducible() {
        let mut a = backdrop(900.0, StaticCapabilities::desktop());
        let mut b = backdrop(900.0, StaticCapabilities::desktop());
        let mut sa = RecordingSurface::new();
        let mut sb = RecordingSurface::new();
        for i in 0..30 {
            a.frame_at(&mut sa, i as f64);
            b.frame_at(&mut sb, i as f64 * 3.0);
        }
        assert_eq!(sa.commands(), sb.commands());
    }

    #[test]
    fn test_wide_to_narrow_resize_keeps_prefix() {
        let mut b = backdrop(1024.0, StaticCapabilities::desktop());
        let mut surface = RecordingSurface::new();
        assert_eq!(b.field().len(), 100);
        let before: Vec<Particle> = b.field().particles()[..30].to_vec();

        let outcome = b.resize(Viewport::new(400.0, 800.0), &mut surface);
        assert_eq!(outcome.current, 30);
        assert_eq!(b.field().particles(), &before[..]);
        assert_eq!(
            surface.commands(),
            &[DrawCommand::Resize {
                width: 400,
                height: 800
            }]
        );
        assert_eq!(b.viewport().connection_distance(), 100.0);
    }

    #[test]
    fn test_pointer_repulsion_scenario() {
        let mut b = backdrop(1280.0, StaticCapabilities::desktop());
        let target = b.field().particles()[0].position;
        let pointer = target - Vector2::new(30.0, 40.0);

        let others_near = b.field().particles()[1..]
            .iter()
            .any(|p| p.position.distance_to(&pointer) < 150.0);
        let moved = b.pointer_move(pointer.x, pointer.y);
        assert!(moved >= 1);
        assert_eq!(b.pointer(), Some(pointer));

        let after = b.field().particles()[0].position;
        let shift = after - target;
        let expected = (150.0 - 50.0) / 150.0 * 3.0;
        assert!((shift.length() - expected).abs() < 1e-4);
        assert!(shift.approx_eq(&(Vector2::new(0.6, 0.8) * expected), 1e-4));
        if !others_near {
            assert_eq!(moved, 1);
        }
    }

    #[test]
    fn test_touch_devices_ignore_pointer() {
        let mut b = backdrop(1280.0, StaticCapabilities::phone());
        let before = b.field().particles().to_vec();
        let p = before[0].position;
        assert!(!b.accepts_pointer());
        assert_eq!(b.pointer_move(p.x, p.y), 0);
        assert_eq!(b.field().particles(), &before[..]);
        assert_eq!(b.pointer(), None);
    }

    #[test]
    fn test_pointer_leave_clears_position() {
        let mut b = backdrop(1280.0, StaticCapabilities::desktop());
        b.pointer_move(10.0, 10.0);
        b.pointer_leave();
        assert_eq!(b.pointer(), None);
    }
}
