//! Browser surface: executes draw commands on a `CanvasRenderingContext2d`.

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::{Rect, Stroke};
use crate::surface::Surface;

/// Borrowed 2D context of an HTML canvas element.
pub struct WebSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> WebSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

#[allow(clippy::cast_precision_loss)]
fn bounds(rect: Rect) -> (f64, f64, f64, f64) {
    (rect.x as f64, rect.y as f64, f64::from(rect.width), f64::from(rect.height))
}

impl Surface for WebSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), JsValue> {
        let (x, y, w, h) = bounds(rect);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), JsValue> {
        let (x, y, w, h) = bounds(rect);
        let dash = Array::new();
        for segment in stroke.dash {
            dash.push(&JsValue::from_f64(segment));
        }
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.line_width);
        self.ctx.set_line_dash(&dash)?;
        self.ctx.stroke_rect(x, y, w, h);
        Ok(())
    }
}
