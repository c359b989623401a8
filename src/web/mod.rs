//! Web bindings for the backdrop.
//!
//! This module provides JavaScript-friendly APIs via wasm-bindgen and wires
//! the renderer to the canvas, `requestAnimationFrame` and DOM events.

mod canvas;
mod device;
mod effects;
mod page;
mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, MouseEvent, Performance, Window};

use crate::core::{
    BackdropError, Debouncer, DeviceCapabilities, FpsMonitor, FrameLoop, StaticCapabilities,
    Ticket, Viewport, MONITOR_MIN_WIDTH,
};
use crate::effects::{redirect_target, PageConfig};
use crate::math::Color;
use crate::render::Backdrop;

pub use canvas::{find_or_create_canvas, CanvasSurface, DEFAULT_CANVAS_ID};
pub use device::{read_viewport, watch_battery, WebCapabilities};
pub use effects::{explode, start_lightning, LIGHTNING_ID};
pub use page::{
    build_background, build_shapes, register_service_worker, start_title_glitch,
    sync_body_classes,
};
pub use scheduler::{AnimationFrameScheduler, FrameCallback};

/// Id of the call-to-action that plays the explosion before navigating.
pub const REGISTER_BUTTON_ID: &str = "register-btn";

const LOW_PERFORMANCE_CLASS: &str = "low-performance";

pub(crate) fn host_error(err: JsValue) -> BackdropError {
    BackdropError::Host(format!("{:?}", err))
}

pub(crate) fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Render statistics exposed to JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Frames rendered so far.
    pub frame: u64,
    /// Live particles.
    pub particles: u32,
    /// Connection lines in the last frame.
    pub connections: u32,
    /// Primitives issued in the last frame.
    pub draw_calls: u32,
    /// Last measured frame rate, 0 when not monitored.
    pub fps: u32,
}

struct AppState {
    window: Window,
    document: Document,
    performance: Option<Performance>,
    backdrop: Backdrop,
    surface: CanvasSurface,
    frame_loop: FrameLoop<AnimationFrameScheduler>,
    fps: Option<FpsMonitor>,
    resize: Debouncer,
    capabilities: StaticCapabilities,
    palette: Vec<Color>,
    form_url: Option<String>,
    rng: SmallRng,
}

impl AppState {
    fn frame(&mut self) {
        if !self.frame_loop.on_frame() {
            return;
        }
        self.backdrop.tick(&mut self.surface);
        self.sample_fps();
        self.frame_loop.schedule_next();
    }

    fn sample_fps(&mut self) {
        let (Some(monitor), Some(performance)) = (self.fps.as_mut(), self.performance.as_ref())
        else {
            return;
        };
        let Some(sample) = monitor.record_frame(performance.now()) else {
            return;
        };
        if !sample.entered_low_performance {
            return;
        }
        if let Some(body) = self.document.body() {
            if let Err(e) = body.class_list().add_1(LOW_PERFORMANCE_CLASS) {
                log::warn!("could not mark low performance: {:?}", e);
            }
        }
    }

    fn apply_resize(&mut self, ticket: Ticket) {
        if !self.resize.settle(ticket) {
            return;
        }
        let viewport = read_viewport(&self.window, self.backdrop.viewport());
        self.backdrop.resize(viewport, &mut self.surface);
        sync_body_classes(&self.document, &self.capabilities, &viewport);
    }

    fn orientation_changed(&self) {
        let viewport = read_viewport(&self.window, self.backdrop.viewport());
        sync_body_classes(&self.document, &self.capabilities, &viewport);
    }

    fn visibility_changed(&mut self) {
        if self.document.hidden() {
            log::debug!("page hidden");
            self.frame_loop.pause();
        } else {
            log::debug!("page visible");
            self.frame_loop.resume();
        }
    }

    fn explode(&mut self, link: Option<&str>) -> Result<usize, BackdropError> {
        let viewport = self.backdrop.viewport();
        let redirect = redirect_target(link, self.form_url.as_deref());
        explode(
            &self.window,
            &self.document,
            &viewport,
            &self.palette,
            &mut self.rng,
            redirect,
        )
    }

    fn stats(&self) -> RenderStats {
        let info = self.backdrop.info();
        RenderStats {
            frame: info.frame,
            particles: self.backdrop.field().len() as u32,
            connections: info.connections as u32,
            draw_calls: info.draw_calls,
            fps: self.fps.as_ref().map_or(0, FpsMonitor::fps),
        }
    }
}

fn listen<T: ?Sized + WasmClosure>(
    target: &EventTarget,
    event: &str,
    callback: Closure<T>,
) -> Result<(), BackdropError> {
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(host_error)?;
    callback.forget();
    Ok(())
}

/// The backdrop attached to a page.
///
/// When setup fails the handle is inert: every method is a harmless no-op.
#[wasm_bindgen]
pub struct BackdropApp {
    state: Option<Rc<RefCell<AppState>>>,
}

#[wasm_bindgen]
impl BackdropApp {
    /// Attach to the canvas `canvas_id` (default `bg-canvas`, created if
    /// missing) and start animating. `config_json` overrides field and page
    /// settings.
    #[wasm_bindgen]
    pub fn start(canvas_id: Option<String>, config_json: Option<String>) -> BackdropApp {
        let canvas_id = canvas_id.unwrap_or_else(|| DEFAULT_CANVAS_ID.to_string());
        match Self::try_start(&canvas_id, config_json.as_deref()) {
            Ok(state) => BackdropApp { state: Some(state) },
            Err(err) => {
                log::warn!("backdrop disabled: {}", err);
                BackdropApp { state: None }
            }
        }
    }

    /// Live particle count, 0 when inert.
    #[wasm_bindgen]
    pub fn particle_count(&self) -> u32 {
        self.with_state(|app| app.backdrop.field().len() as u32)
            .unwrap_or_default()
    }

    /// Whether frames are being produced.
    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.with_state(|app| app.frame_loop.is_running())
            .unwrap_or_default()
    }

    /// Stop animating until [`resume`](Self::resume). Idempotent.
    #[wasm_bindgen]
    pub fn pause(&self) {
        self.with_state(|app| app.frame_loop.pause());
    }

    /// Continue after [`pause`](Self::pause). Idempotent.
    #[wasm_bindgen]
    pub fn resume(&self) {
        self.with_state(|app| app.frame_loop.resume());
    }

    /// Statistics for the last frame.
    #[wasm_bindgen]
    pub fn stats(&self) -> RenderStats {
        self.with_state(|app| app.stats()).unwrap_or_default()
    }

    /// Play the explosion transition, then navigate to `redirect_url`, or to
    /// the configured form URL when none is given. Returns the number of
    /// fragments, 0 when nothing played.
    #[wasm_bindgen]
    pub fn trigger_explosion(&self, redirect_url: Option<String>) -> u32 {
        let played = self.with_state(|app| app.explode(redirect_url.as_deref()));
        match played {
            Some(Ok(count)) => count as u32,
            Some(Err(e)) => {
                log::warn!("explosion failed: {}", e);
                0
            }
            None => 0,
        }
    }
}

impl BackdropApp {
    fn try_start(
        canvas_id: &str,
        config_json: Option<&str>,
    ) -> Result<Rc<RefCell<AppState>>, BackdropError> {
        let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
        let document = window.document().ok_or(BackdropError::NoDocument)?;
        let PageConfig {
            field: config,
            form_url,
            service_worker,
            decorations,
        } = match config_json {
            Some(json) => PageConfig::from_json(json)?,
            None => PageConfig::default(),
        };

        if decorations {
            if let Err(e) = build_background(&document) {
                log::warn!("background layers skipped: {}", e);
            }
        }

        let canvas = find_or_create_canvas(&document, canvas_id)?;
        let mut surface = CanvasSurface::new(canvas.clone())?;

        let capabilities = StaticCapabilities::snapshot(&WebCapabilities::new(window.clone()));
        let viewport = read_viewport(&window, Viewport::default());
        if decorations {
            if let Err(e) = build_shapes(&document, &viewport) {
                log::warn!("geometric shapes skipped: {}", e);
            }
        }
        sync_body_classes(&document, &capabilities, &viewport);
        let performance = window.performance();
        let fps = match &performance {
            Some(p) if viewport.width >= MONITOR_MIN_WIDTH => Some(FpsMonitor::new(p.now())),
            _ => None,
        };

        let resize = Debouncer::new(config.resize_debounce_ms);
        let palette = config.palette.clone();
        let backdrop = Backdrop::new(viewport, config, &capabilities, random_seed());
        backdrop.size_surface(&mut surface);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler::new(window.clone(), callback.clone());

        let state = Rc::new(RefCell::new(AppState {
            window: window.clone(),
            document: document.clone(),
            performance,
            backdrop,
            surface,
            frame_loop: FrameLoop::new(scheduler),
            fps,
            resize,
            capabilities,
            palette,
            form_url,
            rng: SmallRng::seed_from_u64(random_seed()),
        }));

        let frame_state = state.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            match frame_state.try_borrow_mut() {
                Ok(mut app) => app.frame(),
                Err(_) => log::warn!("frame skipped: state busy"),
            }
        }) as Box<dyn FnMut()>));

        if !capabilities.is_touch_primary() {
            let move_state = state.clone();
            listen(
                &canvas,
                "mousemove",
                Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    if let Ok(mut app) = move_state.try_borrow_mut() {
                        app.backdrop
                            .pointer_move(event.client_x() as f32, event.client_y() as f32);
                    }
                }),
            )?;

            let leave_state = state.clone();
            listen(
                &canvas,
                "mouseleave",
                Closure::<dyn FnMut()>::new(move || {
                    if let Ok(mut app) = leave_state.try_borrow_mut() {
                        app.backdrop.pointer_leave();
                    }
                }),
            )?;
        }

        let resize_state = state.clone();
        let resize_window = window.clone();
        listen(
            &window,
            "resize",
            Closure::<dyn FnMut()>::new(move || {
                let Ok(mut app) = resize_state.try_borrow_mut() else {
                    return;
                };
                let ticket = app.resize.trigger();
                let delay = app.resize.delay_ms() as f64;
                drop(app);
                let settle_state = resize_state.clone();
                effects::after(&resize_window, delay, move || {
                    if let Ok(mut app) = settle_state.try_borrow_mut() {
                        app.apply_resize(ticket);
                    }
                });
            }),
        )?;

        let orientation_state = state.clone();
        listen(
            &window,
            "orientationchange",
            Closure::<dyn FnMut()>::new(move || {
                if let Ok(app) = orientation_state.try_borrow() {
                    app.orientation_changed();
                }
            }),
        )?;

        let visibility_state = state.clone();
        listen(
            &document,
            "visibilitychange",
            Closure::<dyn FnMut()>::new(move || {
                if let Ok(mut app) = visibility_state.try_borrow_mut() {
                    app.visibility_changed();
                }
            }),
        )?;

        if let Some(button) = document.get_element_by_id(REGISTER_BUTTON_ID) {
            let button_state = state.clone();
            let target = button.clone();
            listen(
                &button,
                "click",
                Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    event.prevent_default();
                    let href = target.get_attribute("href");
                    if let Ok(mut app) = button_state.try_borrow_mut() {
                        if let Err(e) = app.explode(href.as_deref()) {
                            log::warn!("explosion failed: {}", e);
                        }
                    }
                }),
            )?;
        }

        start_lightning(&window, &document, capabilities.is_mobile());
        if let Err(e) = start_title_glitch(&window, &document) {
            log::warn!("title glitch skipped: {}", e);
        }
        if let Some(script) = service_worker.as_deref() {
            if let Err(e) = register_service_worker(&window, &document, script) {
                log::warn!("service worker skipped: {}", e);
            }
        }
        watch_battery(&window, document);

        let mut app = state.borrow_mut();
        app.frame_loop.start();
        log::info!(
            "backdrop started: {}x{}, {} particles",
            viewport.width,
            viewport.height,
            app.backdrop.field().len()
        );
        drop(app);
        Ok(state)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
        let state = self.state.as_ref()?;
        let mut app = state.try_borrow_mut().ok()?;
        Some(f(&mut app))
    }
}
