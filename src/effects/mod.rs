//! Page-level decorations and effects outside the particle field.
//!
//! Only timing and layout live here; the web bindings apply them to DOM
//! elements.

mod explosion;
mod glitch;
mod lightning;
mod page;

pub use explosion::{
    BurstParticle, ExplosionBurst, CLEANUP_MS, REDIRECT_DELAY_MS, SHAKE_MS, SHOCKWAVE_COUNT,
};
pub use glitch::{
    glitch_amplitude, GlitchShadow, GLITCH_CHANCE, GLITCH_RESET_MS, GLITCH_TICK_MS,
    RESTING_SHADOW, TITLE_SELECTOR,
};
pub use lightning::{
    explosion_flash_sequence, strike_sequence, FlashState, FlashStep, LightningTimer,
    FIRST_STRIKE_DELAY_MS,
};
pub use page::{
    body_classes, redirect_target, service_worker_allowed, shapes_enabled, PageConfig,
    FloatingShape, ANIMATED_BG_CLASS, BACKGROUND_LAYERS, DEFAULT_SERVICE_WORKER, GEOMETRIC_SHAPES,
    GRID_OVERLAY_CLASS, LANDSCAPE_CLASS, LIGHTNING_CLASS, MOBILE_DEVICE_CLASS,
    REDUCE_MOTION_CLASS, SHAPES_CONTAINER_CLASS, SHAPES_MIN_WIDTH,
};
