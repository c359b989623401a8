//! Viewport and device sensing in the browser.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, EventTarget, Window};

use crate::core::{battery_is_low, is_mobile_user_agent, DeviceCapabilities, Viewport};

/// Read `innerWidth`/`innerHeight`, keeping `previous` on failure.
pub fn read_viewport(window: &Window, previous: Viewport) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    match (width, height) {
        (Some(w), Some(h)) => Viewport::new(w as f32, h as f32),
        _ => {
            log::warn!("viewport read failed, keeping {}x{}", previous.width, previous.height);
            previous
        }
    }
}

/// Capabilities answered by the live window.
pub struct WebCapabilities {
    window: Window,
}

impl WebCapabilities {
    /// Query `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl DeviceCapabilities for WebCapabilities {
    fn is_touch_primary(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
    }

    fn is_mobile(&self) -> bool {
        self.window
            .navigator()
            .user_agent()
            .map(|ua| is_mobile_user_agent(&ua))
            .unwrap_or(false)
    }

    fn prefers_reduced_motion(&self) -> bool {
        matches!(
            self.window.match_media("(prefers-reduced-motion: reduce)"),
            Ok(Some(query)) if query.matches()
        )
    }
}

const LOW_BATTERY_CLASS: &str = "low-battery";

fn read_battery(battery: &JsValue) -> Option<(f64, bool)> {
    let level = Reflect::get(battery, &JsValue::from_str("level")).ok()?.as_f64()?;
    let charging = Reflect::get(battery, &JsValue::from_str("charging"))
        .ok()?
        .as_bool()?;
    Some((level, charging))
}

fn apply_battery_class(document: &Document, battery: &JsValue) {
    let (Some((level, charging)), Some(body)) = (read_battery(battery), document.body()) else {
        return;
    };
    let list = body.class_list();
    let result = if battery_is_low(level, charging) {
        list.add_1(LOW_BATTERY_CLASS)
    } else {
        list.remove_1(LOW_BATTERY_CLASS)
    };
    if let Err(e) = result {
        log::warn!("battery class update failed: {:?}", e);
    }
}

/// Toggle the `low-battery` body class from the Battery Status API, when the
/// browser has one.
pub fn watch_battery(window: &Window, document: Document) {
    let navigator = window.navigator();
    let Some(get_battery) = Reflect::get(&navigator, &JsValue::from_str("getBattery"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        log::debug!("battery status unavailable");
        return;
    };
    let Some(promise) = get_battery
        .call0(&navigator)
        .ok()
        .and_then(|p| p.dyn_into::<Promise>().ok())
    else {
        return;
    };

    let on_battery = Closure::once(move |battery: JsValue| {
        apply_battery_class(&document, &battery);
        let Some(target) = battery.dyn_ref::<EventTarget>() else {
            return;
        };
        let watched = battery.clone();
        let on_change = Closure::<dyn FnMut()>::new(move || {
            apply_battery_class(&document, &watched);
        });
        for event in ["levelchange", "chargingchange"] {
            if let Err(e) =
                target.add_event_listener_with_callback(event, on_change.as_ref().unchecked_ref())
            {
                log::warn!("could not watch {}: {:?}", event, e);
            }
        }
        on_change.forget();
    });
    let _ = promise.then(&on_battery);
    on_battery.forget();
}
