//! # Core Module
//!
//! Timing, viewport sensing, the frame loop and other host-facing plumbing
//! shared by the renderer and the web bindings.

mod capabilities;
mod clock;
mod debounce;
mod error;
mod frame_loop;
mod perf;
mod viewport;

pub use capabilities::{battery_is_low, is_mobile_user_agent, DeviceCapabilities, StaticCapabilities};
pub use clock::Clock;
pub use debounce::{Debouncer, Ticket, RESIZE_DEBOUNCE_MS};
pub use error::BackdropError;
pub use frame_loop::{FrameLoop, FrameScheduler, LoopState};
pub use perf::{FpsMonitor, FpsSample, LOW_FPS_THRESHOLD, MONITOR_MIN_WIDTH};
pub use viewport::{Viewport, ViewportClass, MAX_PARTICLES};
