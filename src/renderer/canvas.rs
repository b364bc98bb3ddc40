//! Canvas 2D executor for draw commands

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::DrawCmd;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Returns `None` if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Clear the canvas and paint `commands` in order
    pub fn draw(&self, commands: &[DrawCmd]) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

        for cmd in commands {
            ctx.begin_path();
            match cmd {
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_err()
                    {
                        continue;
                    }
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                DrawCmd::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => {
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_err()
                    {
                        continue;
                    }
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCmd::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
        }
    }
}
