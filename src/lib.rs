//! # Backdrop - Animated Particle Field for Event Landing Pages
//!
//! Backdrop draws a full-screen field of drifting particles behind a static
//! page, compiled to WebAssembly and rendered through the canvas 2D API.
//!
//! ## Features
//!
//! - **Math**: 2D vectors and colors
//! - **Core**: Viewport buckets, frame loop, debouncing, device sensing
//! - **Particles**: Particle pool, motion, connections and pointer repulsion
//! - **Render**: Per-frame renderer over a [`render::DrawSurface`]
//! - **Effects**: Lightning, explosion, title glitch and page decoration layout
//!
//! ## Example
//!
//! ```
//! use backdrop::prelude::*;
//!
//! let caps = StaticCapabilities::desktop();
//! let mut backdrop = Backdrop::new(Viewport::new(1280.0, 720.0), FieldConfig::default(), &caps, 42);
//! let mut surface = RecordingSurface::new();
//! backdrop.frame_at(&mut surface, 0.0);
//! assert_eq!(backdrop.field().len(), 100);
//! ```

#![warn(missing_docs)]

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

pub mod core;
pub mod effects;
pub mod math;
pub mod particles;
pub mod render;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::core::*;
    pub use crate::effects::*;
    pub use crate::math::*;
    pub use crate::particles::*;
    pub use crate::render::*;
}

/// Initialize the crate for WASM environments.
/// Sets up panic hooks and routes `log` output to the browser console.
#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "Backdrop";
