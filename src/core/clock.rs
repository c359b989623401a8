//! Monotonic clock for animation timing.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use web_sys::window;

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
use std::time::Instant;

/// Seconds elapsed since the clock started. Never runs backwards.
pub struct Clock {
    /// Host time of the last reading, in seconds.
    old_time: f64,
    /// Accumulated elapsed time.
    elapsed_time: f64,

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    origin: Instant,
}

impl Clock {
    /// Create and start a new clock.
    pub fn start_new() -> Self {
        let mut clock = Self {
            old_time: 0.0,
            elapsed_time: 0.0,
            #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
            origin: Instant::now(),
        };
        clock.old_time = clock.now();
        clock
    }

    /// Host time in seconds.
    fn now(&self) -> f64 {
        #[cfg(all(feature = "web", target_arch = "wasm32"))]
        {
            // No performance object reads as zero.
            window()
                .and_then(|w| w.performance())
                .map(|p| p.now() / 1000.0)
                .unwrap_or(0.0)
        }

        #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
        {
            self.origin.elapsed().as_secs_f64()
        }
    }

    /// Elapsed time since the clock started (in seconds).
    pub fn get_elapsed_time(&mut self) -> f64 {
        let new_time = self.now();
        // Hosts whose timer steps backwards add nothing.
        self.elapsed_time += (new_time - self.old_time).max(0.0);
        self.old_time = new_time;
        self.elapsed_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_near_zero() {
        let mut clock = Clock::start_new();
        let t = clock.get_elapsed_time();
        assert!((0.0..1.0).contains(&t));
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = Clock::start_new();
        let mut last = clock.get_elapsed_time();
        for _ in 0..100 {
            let now = clock.get_elapsed_time();
            assert!(now >= last);
            last = now;
        }
    }
}
