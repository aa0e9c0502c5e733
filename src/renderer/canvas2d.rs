//! Scene drawing with `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::sim::{Bounds, Canvas, Item, Scene, Shape, Style};

/// Draws a [`Scene`] onto a 2D canvas context
pub struct SceneRenderer {
    ctx: CanvasRenderingContext2d,
}

impl SceneRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Clear to the background and draw every shape bottom to top
    pub fn render(&self, scene: &Scene) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(scene.background());
        self.ctx
            .fill_rect(0.0, 0.0, scene.width() as f64, scene.height() as f64);

        for shape in scene.shapes() {
            self.draw_shape(shape)?;
        }
        Ok(())
    }

    fn draw_shape(&self, shape: &Shape) -> Result<(), JsValue> {
        let b = &shape.bounds;
        match &shape.item {
            Item::Rectangle => {
                self.ctx.set_fill_style_str(&shape.style.fill);
                self.ctx.fill_rect(
                    b.left as f64,
                    b.top as f64,
                    b.width() as f64,
                    b.height() as f64,
                );
                if self.set_outline(&shape.style) {
                    self.ctx.stroke_rect(
                        b.left as f64,
                        b.top as f64,
                        b.width() as f64,
                        b.height() as f64,
                    );
                }
            }
            Item::Oval => {
                self.oval_path(b)?;
                self.ctx.set_fill_style_str(&shape.style.fill);
                self.ctx.fill();
                if self.set_outline(&shape.style) {
                    self.ctx.stroke();
                }
            }
            Item::Text { content, font } => {
                let center = b.center();
                self.ctx.set_font(&font.css());
                self.ctx.set_text_align("center");
                self.ctx.set_text_baseline("middle");
                self.ctx.set_fill_style_str(&shape.style.fill);
                self.ctx
                    .fill_text(content, center.x as f64, center.y as f64)?;
            }
        }
        Ok(())
    }

    fn oval_path(&self, b: &Bounds) -> Result<(), JsValue> {
        let center = b.center();
        self.ctx.begin_path();
        self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            (b.width() * 0.5) as f64,
            (b.height() * 0.5) as f64,
            0.0,
            0.0,
            TAU,
        )
    }

    /// Apply the stroke style, returns false when there is no outline
    fn set_outline(&self, style: &Style) -> bool {
        match &style.outline {
            Some(color) if style.outline_width > 0.0 => {
                self.ctx.set_stroke_style_str(color);
                self.ctx.set_line_width(style.outline_width as f64);
                true
            }
            _ => false,
        }
    }
}
