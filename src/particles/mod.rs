//! Ambient particle field.
//!
//! A pool of drifting shapes sized by the viewport bucket, updated once per
//! frame, joined by proximity lines and nudged away from the pointer.

mod config;
mod field;
mod forces;
mod particle;

pub use config::{FieldConfig, PhaseSource, Span};
pub use field::{connection_opacity, Connection, ParticleField, ResizeOutcome};
pub use forces::Repulsor;
pub use particle::{shimmer, Particle, ShapeKind};
