//! Frame-rate sampling.

/// Frames per second below which the page sheds effects.
pub const LOW_FPS_THRESHOLD: u32 = 30;

/// Viewports narrower than this never run the monitor.
pub const MONITOR_MIN_WIDTH: f32 = 768.0;

/// One completed sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsSample {
    /// Rounded frames per second over the window.
    pub fps: u32,
    /// This sample is the one that first crossed the threshold.
    pub entered_low_performance: bool,
}

/// Counts frames over one-second windows.
#[derive(Debug, Clone)]
pub struct FpsMonitor {
    window_start_ms: f64,
    frames: u32,
    fps: u32,
    low_performance: bool,
}

impl FpsMonitor {
    /// Start sampling at `now_ms`.
    pub fn new(now_ms: f64) -> Self {
        Self {
            window_start_ms: now_ms,
            frames: 0,
            fps: 60,
            low_performance: false,
        }
    }

    /// Count one frame; returns a sample when a window closes.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<FpsSample> {
        self.frames += 1;
        let delta = now_ms - self.window_start_ms;
        if delta < 1000.0 {
            return None;
        }

        self.fps = ((self.frames as f64 * 1000.0) / delta).round() as u32;
        self.frames = 0;
        self.window_start_ms = now_ms;

        let entered = self.fps < LOW_FPS_THRESHOLD && !self.low_performance;
        if entered {
            self.low_performance = true;
            log::info!("low performance detected ({} fps), reducing effects", self.fps);
        }

        Some(FpsSample {
            fps: self.fps,
            entered_low_performance: entered,
        })
    }

    /// Most recent measurement.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Latched once fps has dropped below the threshold.
    #[inline]
    pub fn is_low_performance(&self) -> bool {
        self.low_performance
    }
}
