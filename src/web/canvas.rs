//! Canvas 2D implementation of [`DrawSurface`].

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::core::BackdropError;
use crate::math::{consts::TWO_PI, Color, Vector2};
use crate::render::DrawSurface;

/// Id of the canvas created when the page does not provide one.
pub const DEFAULT_CANVAS_ID: &str = "bg-canvas";

/// Find the canvas by id, creating it as the body's second child if absent.
pub fn find_or_create_canvas(
    document: &Document,
    id: &str,
) -> Result<HtmlCanvasElement, BackdropError> {
    if let Some(element) = document.get_element_by_id(id) {
        return element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BackdropError::CanvasNotFound(id.to_string()));
    }

    let body = document.body().ok_or(BackdropError::NoDocument)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| BackdropError::Host(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| BackdropError::CanvasNotFound(id.to_string()))?;
    canvas.set_id(id);

    let anchor = body.first_child().and_then(|first| first.next_sibling());
    body.insert_before(&canvas, anchor.as_ref())
        .map_err(|e| BackdropError::Host(format!("{:?}", e)))?;
    log::debug!("created canvas #{}", id);
    Ok(canvas)
}

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, BackdropError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| BackdropError::ContextUnavailable)?
            .ok_or(BackdropError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BackdropError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    fn fill_with(&self, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(&color.to_css_hex());
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_rect(&mut self, origin: Vector2, size: Vector2, color: Color, alpha: f32) {
        self.fill_with(color, alpha);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color, alpha: f32) {
        self.fill_with(color, alpha);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TWO_PI as f64)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn fill_polygon(&mut self, points: &[Vector2], color: Color, alpha: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.fill_with(color, alpha);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, width: f32, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_stroke_style_str(&color.to_css_hex());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
