//! Canvas-2D rasterizer
//!
//! Executes a [`Scene`] against a 2D canvas context. Pure presentation: all
//! layout decisions were already made by `compose`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Align, Color, DrawOp, Scene};

fn css_color(c: Color) -> String {
    format!(
        "rgba({},{},{},{})",
        (c[0] * 255.0).round() as u8,
        (c[1] * 255.0).round() as u8,
        (c[2] * 255.0).round() as u8,
        c[3]
    )
}

/// Owns the 2D context and the background art element
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            background: None,
        })
    }

    pub fn set_background(&mut self, image: HtmlImageElement) {
        self.background = Some(image);
    }

    pub fn render(&self, scene: &Scene) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for op in &scene.ops {
            match op {
                DrawOp::Fill { color } | DrawOp::Overlay { color } => {
                    self.ctx.set_fill_style_str(&css_color(*color));
                    self.ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawOp::BackgroundImage => {
                    if let Some(img) = &self.background {
                        let _ = self
                            .ctx
                            .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h);
                    }
                }
                DrawOp::Panel { pos, size, color } => {
                    self.ctx.set_fill_style_str(&css_color(*color));
                    self.ctx
                        .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawOp::Text {
                    text,
                    pos,
                    size_px,
                    color,
                    align,
                } => {
                    self.ctx.set_fill_style_str(&css_color(*color));
                    self.ctx.set_font(&format!("{size_px}px sans-serif"));
                    match align {
                        Align::Center => {
                            self.ctx.set_text_align("center");
                            self.ctx.set_text_baseline("middle");
                        }
                        Align::Left => {
                            self.ctx.set_text_align("left");
                            self.ctx.set_text_baseline("top");
                        }
                    }
                    let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
                DrawOp::Glyph { value, pos, size } => {
                    self.ctx.set_fill_style_str(&css_color(super::COLOR_WHITE));
                    self.ctx.set_font(&format!("{size}px sans-serif"));
                    self.ctx.set_text_align("center");
                    self.ctx.set_text_baseline("middle");
                    let _ = self
                        .ctx
                        .fill_text(&value.to_string(), pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
