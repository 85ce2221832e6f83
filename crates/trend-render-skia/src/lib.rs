// File: crates/trend-render-skia/src/lib.rs
// Summary: Rasterizes a trend-core `Surface` to PNG using Skia CPU raster surfaces.

pub mod text;

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::debug;
use trend_core::surface::{TICK_FONT_SIZE, TICK_SIZE};
use trend_core::{Axis, AxisOrient, Color, Element, Surface, TextAnchor, TextElement};

pub use text::TextShaper;

#[derive(Clone, Copy, Debug)]
pub struct RasterOptions {
    /// Skip all text; keeps pixels independent of installed fonts.
    pub draw_text: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { draw_text: true }
    }
}

pub struct SkiaRenderer {
    shaper: TextShaper,
    pub opts: RasterOptions,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new(RasterOptions::default()) }
}

fn sk(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

impl SkiaRenderer {
    pub fn new(opts: RasterOptions) -> Self {
        Self { shaper: TextShaper::new(), opts }
    }

    /// Encode the scene as PNG bytes.
    pub fn render_to_png_bytes(&self, scene: &Surface) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((scene.width as i32, scene.height as i32))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(sk(scene.background));
        canvas.save();
        canvas.translate((scene.origin.0, scene.origin.1));
        for e in scene.elements() {
            self.draw_element(canvas, e);
        }
        canvas.restore();

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(bytes = data.len(), elements = scene.elements().len(), "rasterized surface");
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG at `path`, creating parent directories.
    pub fn render_to_png(&self, scene: &Surface, path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw_element(&self, canvas: &skia::Canvas, e: &Element) {
        match e {
            Element::Axis { axis, line, label } => self.draw_axis(canvas, axis, *line, *label),
            Element::LinePath { points, stroke, width, .. } => draw_polyline(canvas, points, *stroke, *width),
            Element::Marker { cx, cy, r, fill, .. } => {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Fill);
                paint.set_color(sk(*fill));
                canvas.draw_circle((*cx, *cy), *r, &paint);
            }
            Element::Text(t) => self.draw_text(canvas, t),
        }
    }

    fn draw_axis(&self, canvas: &skia::Canvas, axis: &Axis, line: Color, label: Color) {
        let mut paint = skia::Paint::default();
        paint.set_color(sk(line));
        paint.set_anti_alias(true);
        paint.set_stroke_width(1.0);

        let o = axis.offset;
        match axis.orient {
            AxisOrient::Bottom => {
                canvas.draw_line((axis.start_px, o), (axis.end_px, o), &paint);
                for t in &axis.ticks {
                    canvas.draw_line((t.pos, o), (t.pos, o + TICK_SIZE), &paint);
                    if self.opts.draw_text {
                        let at = (t.pos, o + TICK_SIZE + 3.0 + TICK_FONT_SIZE);
                        self.shaper.draw_anchored(canvas, &t.label, at, TICK_FONT_SIZE, sk(label), TextAnchor::Middle);
                    }
                }
            }
            AxisOrient::Left => {
                canvas.draw_line((o, axis.start_px), (o, axis.end_px), &paint);
                for t in &axis.ticks {
                    canvas.draw_line((o - TICK_SIZE, t.pos), (o, t.pos), &paint);
                    if self.opts.draw_text {
                        let at = (o - TICK_SIZE - 3.0, t.pos + TICK_FONT_SIZE * 0.32);
                        self.shaper.draw_anchored(canvas, &t.label, at, TICK_FONT_SIZE, sk(label), TextAnchor::End);
                    }
                }
            }
        }
    }

    fn draw_text(&self, canvas: &skia::Canvas, t: &TextElement) {
        if !self.opts.draw_text {
            return;
        }
        canvas.save();
        if t.rotation != 0.0 {
            canvas.rotate(t.rotation, None);
        }
        self.shaper.draw_anchored(canvas, &t.content, (t.x, t.y), t.size, sk(t.color), t.anchor);
        canvas.restore();
    }
}

fn draw_polyline(canvas: &skia::Canvas, points: &[(f32, f32)], stroke: Color, width: f32) {
    let Some(&(x0, y0)) = points.first() else { return };
    let mut path = skia::Path::new();
    path.move_to((x0, y0));
    for &(x, y) in points.iter().skip(1) {
        path.line_to((x, y));
    }

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(sk(stroke));
    canvas.draw_path(&path, &paint);
}
