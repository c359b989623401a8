//! DOM side of the page decorations: background layers, floating shapes,
//! title glitch, body classes and service worker registration.

use js_sys::Reflect;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use super::effects::{after, create_div};
use super::{host_error, listen, random_seed, read_viewport, LIGHTNING_ID};
use crate::core::{BackdropError, DeviceCapabilities, Viewport};
use crate::effects::{
    body_classes, service_worker_allowed, shapes_enabled, GlitchShadow, ANIMATED_BG_CLASS,
    BACKGROUND_LAYERS, GEOMETRIC_SHAPES, GLITCH_RESET_MS, GLITCH_TICK_MS, GRID_OVERLAY_CLASS,
    LIGHTNING_CLASS, RESTING_SHADOW, SHAPES_CONTAINER_CLASS, TITLE_SELECTOR,
};

fn prepend(document: &Document, element: &HtmlElement) -> Result<(), BackdropError> {
    let body = document.body().ok_or(BackdropError::NoDocument)?;
    let first = body.first_child();
    body.insert_before(element, first.as_ref())
        .map_err(host_error)?;
    Ok(())
}

/// Insert the layered background, including the `#lightning` overlay, as
/// the body's first child. Skipped when the page already has one.
pub fn build_background(document: &Document) -> Result<(), BackdropError> {
    if document.get_element_by_id(LIGHTNING_ID).is_some() {
        log::debug!("page provides #{}, keeping its background", LIGHTNING_ID);
        return Ok(());
    }

    let container = create_div(document, ANIMATED_BG_CLASS)?;
    for class in BACKGROUND_LAYERS {
        container
            .append_child(&create_div(document, class)?)
            .map_err(host_error)?;
    }
    let lightning = create_div(document, LIGHTNING_CLASS)?;
    lightning.set_id(LIGHTNING_ID);
    container.append_child(&lightning).map_err(host_error)?;

    prepend(document, &container)
}

/// Insert the floating shapes and the grid overlay. Returns false when the
/// viewport is too small for them.
pub fn build_shapes(document: &Document, viewport: &Viewport) -> Result<bool, BackdropError> {
    if !shapes_enabled(viewport) {
        return Ok(false);
    }

    let container = create_div(document, SHAPES_CONTAINER_CLASS)?;
    prepend(document, &container)?;
    for shape in GEOMETRIC_SHAPES {
        let div = create_div(document, &shape.class_name())?;
        div.style()
            .set_property("animation-delay", &shape.animation_delay())
            .map_err(host_error)?;
        container.append_child(&div).map_err(host_error)?;
    }

    prepend(document, &create_div(document, GRID_OVERLAY_CLASS)?)?;
    Ok(true)
}

/// Match the device and orientation body classes to the current state.
pub fn sync_body_classes(
    document: &Document,
    capabilities: &dyn DeviceCapabilities,
    viewport: &Viewport,
) {
    let Some(body) = document.body() else {
        return;
    };
    let list = body.class_list();
    for (class, on) in body_classes(capabilities, viewport) {
        if let Err(e) = list.toggle_with_force(class, on) {
            log::warn!("could not toggle {}: {:?}", class, e);
        }
    }
}

/// Glitch the page title at random, if the page has one.
pub fn start_title_glitch(window: &Window, document: &Document) -> Result<(), BackdropError> {
    let Some(title) = document
        .query_selector(TITLE_SELECTOR)
        .map_err(host_error)?
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        log::debug!("no {} element, title glitch disabled", TITLE_SELECTOR);
        return Ok(());
    };

    let tick_window = window.clone();
    let mut rng = SmallRng::seed_from_u64(random_seed());
    let mut viewport = read_viewport(window, Viewport::default());
    let tick = Closure::<dyn FnMut()>::new(move || {
        viewport = read_viewport(&tick_window, viewport);
        let Some(shadow) = GlitchShadow::roll(&mut rng, &viewport) else {
            return;
        };
        if let Err(e) = title.style().set_property("text-shadow", &shadow.text_shadow()) {
            log::warn!("title glitch failed: {:?}", e);
            return;
        }
        let resting = title.clone();
        after(&tick_window, GLITCH_RESET_MS, move || {
            if let Err(e) = resting.style().set_property("text-shadow", RESTING_SHADOW) {
                log::warn!("title reset failed: {:?}", e);
            }
        });
    });
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            GLITCH_TICK_MS,
        )
        .map_err(host_error)?;
    tick.forget();
    Ok(())
}

fn register_now(window: &Window, script: &str) {
    let promise = window.navigator().service_worker().register(script);
    let on_error = Closure::once(|err: JsValue| {
        log::debug!("service worker registration failed: {:?}", err);
    });
    let _ = promise.catch(&on_error);
    on_error.forget();
}

/// Register `script` as the service worker once the page has loaded.
/// Only over https, and only where the browser supports service workers.
pub fn register_service_worker(
    window: &Window,
    document: &Document,
    script: &str,
) -> Result<(), BackdropError> {
    let protocol = window.location().protocol().map_err(host_error)?;
    if !service_worker_allowed(&protocol) {
        log::debug!("service worker skipped on {}", protocol);
        return Ok(());
    }
    let supported = Reflect::has(&window.navigator(), &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        log::debug!("service workers unsupported");
        return Ok(());
    }

    if document.ready_state() == "complete" {
        register_now(window, script);
        return Ok(());
    }
    let load_window = window.clone();
    let script = script.to_string();
    listen(
        window,
        "load",
        Closure::once(move || register_now(&load_window, &script)),
    )
}
