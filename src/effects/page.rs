//! Decorative page markup, body classes and page-level settings.

use serde::{Deserialize, Serialize};

use crate::core::{BackdropError, DeviceCapabilities, Viewport};
use crate::particles::FieldConfig;

/// Container of the layered background, inserted as the body's first child.
pub const ANIMATED_BG_CLASS: &str = "animated-bg";

/// Layers stacked inside the background container, back to front.
pub const BACKGROUND_LAYERS: [&str; 6] = [
    "cloud-layer",
    "cloud-layer-2",
    "cloud-layer-3",
    "vignette",
    "spotlight",
    "spotlight-glow",
];

/// Class of the flash overlay, the last background layer.
pub const LIGHTNING_CLASS: &str = "lightning";

/// Container of the floating outline shapes.
pub const SHAPES_CONTAINER_CLASS: &str = "geometric-shapes";

/// Grid drawn over the shapes.
pub const GRID_OVERLAY_CLASS: &str = "grid-overlay";

/// Viewports narrower than this get no shapes.
pub const SHAPES_MIN_WIDTH: f32 = 480.0;

/// One floating shape and the delay of its CSS animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingShape {
    /// Shape modifier class.
    pub class: &'static str,
    /// Animation delay in seconds.
    pub delay_secs: u32,
}

impl FloatingShape {
    /// Full class attribute.
    pub fn class_name(&self) -> String {
        format!("shape {}", self.class)
    }

    /// Value for `animation-delay`.
    pub fn animation_delay(&self) -> String {
        format!("{}s", self.delay_secs)
    }
}

/// Shapes in insertion order; each starts one second after the previous.
pub const GEOMETRIC_SHAPES: [FloatingShape; 6] = [
    FloatingShape { class: "circle", delay_secs: 0 },
    FloatingShape { class: "triangle", delay_secs: 1 },
    FloatingShape { class: "square", delay_secs: 2 },
    FloatingShape { class: "circle-2", delay_secs: 3 },
    FloatingShape { class: "triangle-2", delay_secs: 4 },
    FloatingShape { class: "square-2", delay_secs: 5 },
];

/// Whether the viewport is wide enough for the floating shapes.
#[inline]
pub fn shapes_enabled(viewport: &Viewport) -> bool {
    viewport.width >= SHAPES_MIN_WIDTH
}

/// Body class for phone and tablet devices.
pub const MOBILE_DEVICE_CLASS: &str = "mobile-device";
/// Body class when the user asked for reduced motion.
pub const REDUCE_MOTION_CLASS: &str = "reduce-motion";
/// Body class while the viewport is wider than tall.
pub const LANDSCAPE_CLASS: &str = "landscape";

/// Desired state of every device-driven body class.
pub fn body_classes(
    capabilities: &dyn DeviceCapabilities,
    viewport: &Viewport,
) -> [(&'static str, bool); 3] {
    [
        (MOBILE_DEVICE_CLASS, capabilities.is_mobile()),
        (REDUCE_MOTION_CLASS, capabilities.prefers_reduced_motion()),
        (LANDSCAPE_CLASS, viewport.is_landscape()),
    ]
}

/// Where the page goes after the explosion.
///
/// A real link target wins. An empty or `#` href falls back to `form_url`.
pub fn redirect_target(link: Option<&str>, form_url: Option<&str>) -> Option<String> {
    match link.map(str::trim) {
        Some(href) if !href.is_empty() && href != "#" => Some(href.to_string()),
        _ => form_url.map(str::to_string),
    }
}

/// Service workers only register over https.
#[inline]
pub fn service_worker_allowed(protocol: &str) -> bool {
    protocol == "https:"
}

/// Script registered as the service worker by default.
pub const DEFAULT_SERVICE_WORKER: &str = "/sw.js";

/// Everything the page passes to `start`: the field settings plus page-level
/// options, all in one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Particle field settings.
    #[serde(flatten)]
    pub field: FieldConfig,
    /// Registration form opened after the explosion when the button has no
    /// usable href.
    pub form_url: Option<String>,
    /// Service worker script, `null` to skip registration.
    pub service_worker: Option<String>,
    /// Build the background layers and floating shapes.
    pub decorations: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            form_url: None,
            service_worker: Some(DEFAULT_SERVICE_WORKER.to_string()),
            decorations: true,
        }
    }
}

impl PageConfig {
    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StaticCapabilities;
    use crate::particles::PhaseSource;

    #[test]
    fn test_shapes_skip_small_screens() {
        assert!(!shapes_enabled(&Viewport::new(479.0, 800.0)));
        assert!(shapes_enabled(&Viewport::new(480.0, 800.0)));
    }

    #[test]
    fn test_shape_markup() {
        let last = GEOMETRIC_SHAPES[5];
        assert_eq!(last.class_name(), "shape square-2");
        assert_eq!(last.animation_delay(), "5s");
        assert!(GEOMETRIC_SHAPES
            .windows(2)
            .all(|w| w[1].delay_secs == w[0].delay_secs + 1));
    }

    #[test]
    fn test_body_classes_follow_device_and_orientation() {
        let phone = StaticCapabilities {
            reduced_motion: true,
            ..StaticCapabilities::phone()
        };
        let classes = body_classes(&phone, &Viewport::new(390.0, 844.0));
        assert_eq!(
            classes,
            [
                (MOBILE_DEVICE_CLASS, true),
                (REDUCE_MOTION_CLASS, true),
                (LANDSCAPE_CLASS, false),
            ]
        );

        let desktop = body_classes(&StaticCapabilities::desktop(), &Viewport::new(1280.0, 800.0));
        assert_eq!(
            desktop,
            [
                (MOBILE_DEVICE_CLASS, false),
                (REDUCE_MOTION_CLASS, false),
                (LANDSCAPE_CLASS, true),
            ]
        );

        let square = body_classes(&StaticCapabilities::desktop(), &Viewport::new(800.0, 800.0));
        assert_eq!(square[2], (LANDSCAPE_CLASS, false));
    }

    #[test]
    fn test_redirect_prefers_real_href() {
        let form = Some("https://forms.example/register");
        assert_eq!(
            redirect_target(Some("/tickets"), form).as_deref(),
            Some("/tickets")
        );
        for missing in [None, Some(""), Some("#"), Some("  ")] {
            assert_eq!(redirect_target(missing, form).as_deref(), form);
        }
        assert_eq!(redirect_target(Some("#"), None), None);
    }

    #[test]
    fn test_service_worker_needs_https() {
        assert!(service_worker_allowed("https:"));
        assert!(!service_worker_allowed("http:"));
        assert!(!service_worker_allowed("file:"));
    }

    #[test]
    fn test_page_config_flattens_field_settings() {
        let cfg = PageConfig::from_json(
            r#"{
                "trail_alpha": 0.1,
                "phase": { "kind": "frame_count", "frame_secs": 0.02 },
                "form_url": "https://forms.example/register"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.field.trail_alpha, 0.1);
        assert_eq!(cfg.field.phase, PhaseSource::FrameCount { frame_secs: 0.02 });
        assert_eq!(cfg.field.margin, 10.0);
        assert_eq!(cfg.service_worker.as_deref(), Some(DEFAULT_SERVICE_WORKER));
        assert!(cfg.decorations);
        assert_eq!(
            redirect_target(Some("#"), cfg.form_url.as_deref()).as_deref(),
            Some("https://forms.example/register")
        );
    }

    #[test]
    fn test_page_config_can_disable_service_worker() {
        let cfg = PageConfig::from_json(r#"{ "service_worker": null, "decorations": false }"#)
            .unwrap();
        assert_eq!(cfg.service_worker, None);
        assert!(!cfg.decorations);
        assert_eq!(cfg.field, FieldConfig::default());
    }
}
