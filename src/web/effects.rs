//! DOM side of the lightning and explosion effects.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use super::{host_error, random_seed};
use crate::core::{BackdropError, Viewport};
use crate::effects::{
    explosion_flash_sequence, strike_sequence, ExplosionBurst, FlashState, FlashStep,
    LightningTimer, CLEANUP_MS, FIRST_STRIKE_DELAY_MS, REDIRECT_DELAY_MS, SHAKE_MS,
    SHOCKWAVE_COUNT,
};
use crate::math::Color;

/// Id of the full-screen flash overlay.
pub const LIGHTNING_ID: &str = "lightning";

/// Run `f` once after `delay_ms`.
pub(crate) fn after(window: &Window, delay_ms: f64, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms.round() as i32,
    ) {
        log::warn!("setTimeout failed: {:?}", e);
    }
}

fn lightning_element(document: &Document) -> Option<HtmlElement> {
    document
        .get_element_by_id(LIGHTNING_ID)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn apply_flash(element: &HtmlElement, state: FlashState) {
    let style = element.style();
    let result = match state {
        FlashState::On { color, alpha } => style
            .set_property("background", &color.to_css_rgba(alpha))
            .and_then(|_| style.set_property("opacity", "1")),
        FlashState::Off => style.set_property("opacity", "0"),
        FlashState::Clear => style
            .set_property("opacity", "0")
            .and_then(|_| style.set_property("background", "transparent")),
    };
    if let Err(e) = result {
        log::warn!("flash update failed: {:?}", e);
    }
}

fn play_sequence(window: &Window, element: &HtmlElement, steps: &[FlashStep]) {
    for step in steps {
        if step.at_ms <= 0.0 {
            apply_flash(element, step.state);
            continue;
        }
        let element = element.clone();
        let state = step.state;
        after(window, step.at_ms, move || apply_flash(&element, state));
    }
}

struct Lightning {
    window: Window,
    element: HtmlElement,
    timer: LightningTimer,
    rng: RefCell<SmallRng>,
}

impl Lightning {
    fn arm(self: Rc<Self>) {
        let delay = self.timer.next_delay_ms(&mut *self.rng.borrow_mut());
        let window = self.window.clone();
        after(&window, delay, move || {
            play_sequence(&self.window, &self.element, &strike_sequence());
            self.arm();
        });
    }
}

/// Start random strikes on the `#lightning` overlay, if the page has one.
pub fn start_lightning(window: &Window, document: &Document, mobile: bool) {
    let Some(element) = lightning_element(document) else {
        log::debug!("no #{} element, lightning disabled", LIGHTNING_ID);
        return;
    };
    let lightning = Rc::new(Lightning {
        window: window.clone(),
        element,
        timer: LightningTimer::for_device(mobile),
        rng: RefCell::new(SmallRng::seed_from_u64(random_seed())),
    });
    after(window, FIRST_STRIKE_DELAY_MS, move || lightning.arm());
}

pub(crate) fn create_div(document: &Document, class: &str) -> Result<HtmlElement, BackdropError> {
    let div = document
        .create_element("div")
        .map_err(host_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| BackdropError::Host("div is not an HtmlElement".to_string()))?;
    div.set_class_name(class);
    Ok(div)
}

/// Play the explosion transition, then navigate to `redirect` if given.
pub fn explode(
    window: &Window,
    document: &Document,
    viewport: &Viewport,
    palette: &[Color],
    rng: &mut SmallRng,
    redirect: Option<String>,
) -> Result<usize, BackdropError> {
    let body = document.body().ok_or(BackdropError::NoDocument)?;

    let container = create_div(document, "explosion-container active")?;
    body.append_child(&container).map_err(host_error)?;
    let white_flash = create_div(document, "white-flash active")?;
    body.append_child(&white_flash).map_err(host_error)?;

    body.class_list().add_1("shake").map_err(host_error)?;
    let shaking = body.clone();
    after(window, SHAKE_MS, move || {
        if let Err(e) = shaking.class_list().remove_1("shake") {
            log::warn!("could not stop shake: {:?}", e);
        }
    });

    container
        .append_child(&create_div(document, "explosion-flash")?)
        .map_err(host_error)?;
    for _ in 0..SHOCKWAVE_COUNT {
        container
            .append_child(&create_div(document, "shockwave")?)
            .map_err(host_error)?;
    }

    let burst = ExplosionBurst::layout(viewport, palette, rng);
    for fragment in &burst.particles {
        let el = create_div(document, "explosion-particle")?;
        let style = el.style();
        let size = format!("{}px", fragment.size);
        style
            .set_property("--tx", &format!("{}px", fragment.offset.x))
            .and_then(|_| style.set_property("--ty", &format!("{}px", fragment.offset.y)))
            .and_then(|_| style.set_property("background", &fragment.color.to_css_hex()))
            .and_then(|_| style.set_property("width", &size))
            .and_then(|_| style.set_property("height", &size))
            .map_err(host_error)?;
        container.append_child(&el).map_err(host_error)?;
    }

    if let Some(lightning) = lightning_element(document) {
        play_sequence(window, &lightning, &explosion_flash_sequence());
    }

    after(window, CLEANUP_MS, move || {
        container.remove();
        white_flash.remove();
    });

    if let Some(url) = redirect {
        let target = window.clone();
        after(window, REDIRECT_DELAY_MS, move || {
            if let Err(e) = target.location().set_href(&url) {
                log::warn!("redirect to {} failed: {:?}", url, e);
            }
        });
    }

    log::info!("explosion with {} fragments", burst.len());
    Ok(burst.len())
}
