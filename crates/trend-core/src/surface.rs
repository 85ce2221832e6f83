// File: crates/trend-core/src/surface.rs
// Summary: Retained drawing surface (scene of axes, paths, markers, text) and its SVG export.
// Notes:
// - Element coordinates are relative to the chart body; `origin` is the body's
//   offset inside the outer frame (the left/top margins).

use std::fmt::Write as _;

use crate::axis::{Axis, AxisOrient};
use crate::theme::Color;

/// Tick mark length in pixels.
pub const TICK_SIZE: f32 = 6.0;
/// Font size of tick labels.
pub const TICK_FONT_SIZE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub size: f32,
    pub anchor: TextAnchor,
    /// Rotation in degrees about the surface origin, applied before `x`/`y`.
    pub rotation: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Axis { axis: Axis, line: Color, label: Color },
    /// Straight segments joining `points` in order.
    LinePath { series: String, points: Vec<(f32, f32)>, stroke: Color, width: f32 },
    Marker { series: String, cx: f32, cy: f32, r: f32, fill: Color },
    Text(TextElement),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub origin: (f32, f32),
    pub background: Color,
    elements: Vec<Element>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, origin: (0.0, 0.0), background: Color::WHITE, elements: Vec::new() }
    }

    /// Drop every element; frame size is kept.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn line_paths(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| matches!(e, Element::LinePath { .. }))
    }

    pub fn markers(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| matches!(e, Element::Marker { .. }))
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.elements.iter().filter_map(|e| match e {
            Element::Axis { axis, .. } => Some(axis),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Standalone SVG document for the current scene.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(
            out,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            self.background.to_hex()
        );
        let _ = writeln!(out, r#"  <g transform="translate({},{})">"#, self.origin.0, self.origin.1);
        for e in &self.elements {
            write_element(&mut out, e);
        }
        out.push_str("  </g>\n</svg>\n");
        out
    }
}

fn write_element(out: &mut String, e: &Element) {
    match e {
        Element::Axis { axis, line, label } => write_axis(out, axis, *line, *label),
        Element::LinePath { series, points, stroke, width } => {
            let mut d = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                let _ = write!(d, "{}{:.2},{:.2}", if i == 0 { "M" } else { "L" }, x, y);
            }
            let _ = writeln!(
                out,
                r#"    <path class="line" data-series="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}" d="{}"/>"#,
                escape(series),
                stroke.to_hex(),
                stroke.opacity(),
                width,
                d
            );
        }
        Element::Marker { series, cx, cy, r, fill } => {
            let _ = writeln!(
                out,
                r#"    <circle class="circle" data-series="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                escape(series),
                cx,
                cy,
                r,
                fill.to_hex(),
                fill.opacity()
            );
        }
        Element::Text(t) => write_text(out, t),
    }
}

fn write_axis(out: &mut String, axis: &Axis, line: Color, label: Color) {
    let (x1, y1, x2, y2) = match axis.orient {
        AxisOrient::Bottom => (axis.start_px, axis.offset, axis.end_px, axis.offset),
        AxisOrient::Left => (axis.offset, axis.start_px, axis.offset, axis.end_px),
    };
    let _ = writeln!(out, r#"    <g class="axis" fill="none" stroke="{}">"#, line.to_hex());
    let _ = writeln!(out, r#"      <line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"/>"#);
    for tick in &axis.ticks {
        let (tx1, ty1, tx2, ty2, lx, ly, anchor) = match axis.orient {
            AxisOrient::Bottom => {
                let y = axis.offset;
                (tick.pos, y, tick.pos, y + TICK_SIZE, tick.pos, y + TICK_SIZE + 3.0 + TICK_FONT_SIZE, "middle")
            }
            AxisOrient::Left => {
                let x = axis.offset;
                (x - TICK_SIZE, tick.pos, x, tick.pos, x - TICK_SIZE - 3.0, tick.pos + TICK_FONT_SIZE * 0.32, "end")
            }
        };
        let _ = writeln!(out, r#"      <line x1="{tx1}" y1="{ty1}" x2="{tx2}" y2="{ty2}"/>"#);
        let _ = writeln!(
            out,
            r#"      <text x="{lx}" y="{ly}" fill="{}" stroke="none" font-size="{}" text-anchor="{anchor}">{}</text>"#,
            label.to_hex(),
            TICK_FONT_SIZE,
            escape(&tick.label)
        );
    }
    out.push_str("    </g>\n");
}

fn write_text(out: &mut String, t: &TextElement) {
    let transform = if t.rotation != 0.0 {
        format!(r#" transform="rotate({})""#, t.rotation)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}"{} fill="{}" font-size="{}px" text-anchor="{}">{}</text>"#,
        t.x,
        t.y,
        transform,
        t.color.to_hex(),
        t.size,
        t.anchor.as_svg(),
        escape(&t.content)
    );
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_escapes_text_and_keeps_origin() {
        let mut s = Surface::new(800, 450);
        s.origin = (40.0, 20.0);
        s.push(Element::Text(TextElement {
            x: 0.0,
            y: 0.0,
            content: "A & B <C>".into(),
            size: 12.0,
            anchor: TextAnchor::Middle,
            rotation: -90.0,
            color: Color::BLACK,
        }));
        let svg = s.to_svg();
        assert!(svg.contains(r#"translate(40,20)"#));
        assert!(svg.contains("A &amp; B &lt;C&gt;"));
        assert!(svg.contains(r#"rotate(-90)"#));
        s.clear();
        assert!(s.is_empty());
    }
}
