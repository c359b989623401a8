//! # Math Module
//!
//! 2D vector and color types used by the particle field.

mod color;
mod vector2;

pub use color::{palette, Color, ParseColorError, PALETTE};
pub use vector2::Vector2;

/// Common math constants and utilities.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f32 = PI * 2.0;
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
