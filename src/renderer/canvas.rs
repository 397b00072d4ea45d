//! Canvas 2D surface (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, SurfaceError, colors};

fn js_error(e: JsValue) -> SurfaceError {
    SurfaceError::Draw(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Draws onto an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(SurfaceError::Lost)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Draw("not a 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the canvas' layout size
    pub fn fit_to_container(&self) {
        let element = self.canvas.parent_element();
        let (w, h) = match element {
            Some(parent) => (parent.client_width(), parent.client_height()),
            None => (self.canvas.client_width(), self.canvas.client_height()),
        };
        if w > 0 && h > 0 {
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            log::info!("Canvas resized to: {}x{}", w, h);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        if !self.canvas.is_connected() {
            return Err(SurfaceError::Lost);
        }
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    ) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(js_error)?;
        self.ctx.set_fill_style_str(&colors::css(color));
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    fn fill_rotated_square(
        &mut self,
        center: Vec2,
        size: f32,
        rotation: f32,
        color: [f32; 4],
    ) -> Result<(), SurfaceError> {
        let half = size as f64 / 2.0;
        self.ctx.save();
        let result = self
            .ctx
            .translate(center.x as f64, center.y as f64)
            .and_then(|_| self.ctx.rotate(rotation as f64));
        if result.is_ok() {
            self.ctx.set_global_alpha(color[3].clamp(0.0, 1.0) as f64);
            self.ctx
                .set_fill_style_str(&colors::css(colors::with_alpha(color, 1.0)));
            self.ctx.fill_rect(-half, -half, size as f64, size as f64);
        }
        self.ctx.restore();
        result.map_err(js_error)
    }
}
