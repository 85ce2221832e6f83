// File: crates/trend-core/src/chart.rs
// Summary: Chart renderer; clears the drawing surface and rebuilds axes, lines, markers and labels.

use tracing::debug;

use crate::axis::Axis;
use crate::config::{ChartConfig, Labels, Style};
use crate::scale::{ScaleBuilder, ScalePair};
use crate::series::Series;
use crate::surface::{Element, Surface, TextAnchor, TextElement};
use crate::theme::Theme;
use crate::types::Layout;

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub layout: Layout,
    pub theme: Theme,
    pub labels: Labels,
    pub style: Style,
}

impl RenderOptions {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self { layout: cfg.layout, theme: cfg.theme(), labels: cfg.labels.clone(), style: cfg.style }
    }
}

/// Full-redraw renderer: every call replaces the whole surface content.
#[derive(Clone, Debug, Default)]
pub struct ChartRenderer {
    pub opts: RenderOptions,
}

impl ChartRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Scale builder sized to this renderer's chart body.
    pub fn scale_builder(&self) -> ScaleBuilder {
        ScaleBuilder::new(self.opts.layout.body_width(), self.opts.layout.body_height())
    }

    /// Fresh surface matching the configured frame.
    pub fn surface(&self) -> Surface {
        let mut s = Surface::new(self.opts.layout.width, self.opts.layout.height);
        self.reset(&mut s);
        s
    }

    /// Draw axes, one path per series, one marker per point, then the labels.
    pub fn render(&self, series: &[Series], scales: &ScalePair, surface: &mut Surface) {
        self.reset(surface);
        let theme = &self.opts.theme;
        let style = &self.opts.style;
        let height = self.opts.layout.body_height();

        surface.push(Element::Axis {
            axis: Axis::bottom(&scales.temporal, height),
            line: theme.axis_line,
            label: theme.tick,
        });
        surface.push(Element::Axis {
            axis: Axis::left(&scales.value),
            line: theme.axis_line,
            label: theme.tick,
        });

        let project = |s: &Series| -> Vec<(f32, f32)> {
            s.values
                .iter()
                .map(|p| (scales.temporal.to_px(p.year), scales.value.to_px(p.value)))
                .collect()
        };

        for s in series {
            surface.push(Element::LinePath {
                series: s.name.clone(),
                points: project(s),
                stroke: theme.line_stroke,
                width: style.line_width,
            });
        }
        for s in series {
            for (cx, cy) in project(s) {
                surface.push(Element::Marker {
                    series: s.name.clone(),
                    cx,
                    cy,
                    r: style.marker_radius,
                    fill: theme.marker,
                });
            }
        }

        self.draw_labels(surface);
        debug!(series = series.len(), elements = surface.elements().len(), "rendered chart");
    }

    /// Title plus a centered notice; no axes, paths or markers.
    pub fn render_empty(&self, surface: &mut Surface) {
        let message = self.opts.labels.empty.clone();
        self.render_notice(surface, message);
    }

    /// Load-failure state: title plus the configured error text and `detail`.
    pub fn render_error(&self, surface: &mut Surface, detail: &str) {
        let message = if detail.is_empty() {
            self.opts.labels.error.clone()
        } else {
            format!("{}: {}", self.opts.labels.error, detail)
        };
        self.render_notice(surface, message);
    }

    fn render_notice(&self, surface: &mut Surface, message: String) {
        self.reset(surface);
        self.draw_title(surface);
        surface.push(Element::Text(TextElement {
            x: self.opts.layout.body_width() / 2.0,
            y: self.opts.layout.body_height() / 2.0,
            content: message,
            size: self.opts.style.label_font_size,
            anchor: TextAnchor::Middle,
            rotation: 0.0,
            color: self.opts.theme.axis_label,
        }));
    }

    fn reset(&self, surface: &mut Surface) {
        let layout = &self.opts.layout;
        surface.clear();
        surface.width = layout.width;
        surface.height = layout.height;
        surface.origin = (layout.insets.left as f32, layout.insets.top as f32);
        surface.background = self.opts.theme.background;
    }

    fn draw_labels(&self, surface: &mut Surface) {
        let layout = &self.opts.layout;
        let width = layout.body_width();
        let height = layout.body_height();
        let left = layout.insets.left as f32;
        let size = self.opts.style.label_font_size;
        let color = self.opts.theme.axis_label;

        surface.push(Element::Text(TextElement {
            x: width / 2.0 + left,
            y: height + 35.0,
            content: self.opts.labels.x.clone(),
            size,
            anchor: TextAnchor::Middle,
            rotation: 0.0,
            color,
        }));
        // rotated -90°: x runs up the page, y runs right
        surface.push(Element::Text(TextElement {
            x: -height / 2.0 + 10.0,
            y: -left + 11.0,
            content: self.opts.labels.y.clone(),
            size,
            anchor: TextAnchor::Middle,
            rotation: -90.0,
            color,
        }));
        self.draw_title(surface);
    }

    fn draw_title(&self, surface: &mut Surface) {
        surface.push(Element::Text(TextElement {
            x: self.opts.layout.body_width() / 2.0,
            y: -2.0,
            content: self.opts.labels.title.clone(),
            size: self.opts.style.title_font_size,
            anchor: TextAnchor::Middle,
            rotation: 0.0,
            color: self.opts.theme.title,
        }));
    }
}
