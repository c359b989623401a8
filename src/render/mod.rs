//! # Render Module
//!
//! The per-frame renderer and the drawing surface it targets.

mod backdrop;
mod surface;

pub use backdrop::{Backdrop, RenderInfo};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
