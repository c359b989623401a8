//! Device capability queries.
//!
//! The renderer never inspects the environment directly; it asks a
//! [`DeviceCapabilities`] implementation so the same logic runs under test
//! and in the browser.

use serde::{Deserialize, Serialize};

/// User-agent fragments that mark a mobile device.
const MOBILE_UA_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Capability checks the backdrop depends on.
pub trait DeviceCapabilities {
    /// Touch is the primary input; pointer repulsion is not wired up.
    fn is_touch_primary(&self) -> bool;

    /// Phone or tablet class device.
    fn is_mobile(&self) -> bool;

    /// The user asked the system to minimize motion.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}

/// Fixed capability answers, used for tests and as a snapshot of a live query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaticCapabilities {
    /// See [`DeviceCapabilities::is_touch_primary`].
    pub touch_primary: bool,
    /// See [`DeviceCapabilities::is_mobile`].
    pub mobile: bool,
    /// See [`DeviceCapabilities::prefers_reduced_motion`].
    pub reduced_motion: bool,
}

impl StaticCapabilities {
    /// A desktop with a mouse.
    pub fn desktop() -> Self {
        Self::default()
    }

    /// A touch-first phone.
    pub fn phone() -> Self {
        Self {
            touch_primary: true,
            mobile: true,
            reduced_motion: false,
        }
    }

    /// Capture the current answers of any capability source.
    pub fn snapshot(source: &dyn DeviceCapabilities) -> Self {
        Self {
            touch_primary: source.is_touch_primary(),
            mobile: source.is_mobile(),
            reduced_motion: source.prefers_reduced_motion(),
        }
    }
}

impl DeviceCapabilities for StaticCapabilities {
    fn is_touch_primary(&self) -> bool {
        self.touch_primary
    }

    fn is_mobile(&self) -> bool {
        self.mobile
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Whether a user-agent string belongs to a mobile browser.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
}

/// Low battery: under 20% and not on the charger.
#[inline]
pub fn battery_is_low(level: f64, charging: bool) -> bool {
    level < 0.2 && !charging
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0"
        ));
    }

    #[test]
    fn test_battery_threshold() {
        assert!(battery_is_low(0.15, false));
        assert!(!battery_is_low(0.15, true));
        assert!(!battery_is_low(0.2, false));
    }

    #[test]
    fn test_snapshot_copies_answers() {
        let snap = StaticCapabilities::snapshot(&StaticCapabilities::phone());
        assert!(snap.is_touch_primary());
        assert!(snap.is_mobile());
        assert!(!snap.prefers_reduced_motion());
    }
}
