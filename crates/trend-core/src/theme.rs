// File: crates/trend-core/src/theme.rs
// Summary: Light (black ink) and dark color themes for the chart.

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const BLACK: Color = Color::from_argb(255, 0, 0, 0);
    pub const WHITE: Color = Color::from_argb(255, 255, 255, 255);

    /// `#rrggbb`, with the alpha carried separately in SVG output.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub line_stroke: Color,
    pub marker: Color,
    pub title: Color,
}

impl Theme {
    /// Black ink on white; the default look of the chart.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            axis_line: Color::BLACK,
            axis_label: Color::BLACK,
            tick: Color::BLACK,
            line_stroke: Color::BLACK,
            marker: Color::BLACK,
            title: Color::BLACK,
        }
    }

    /// Light ink on charcoal for dark pages.
    pub fn dark() -> Self {
        let ink = Color::from_argb(255, 0xe6, 0xe6, 0xe6);
        Self {
            name: "dark",
            background: Color::from_argb(255, 0x1e, 0x1e, 0x1e),
            axis_line: ink,
            axis_label: ink,
            tick: Color::from_argb(255, 0xa0, 0xa0, 0xa0),
            line_stroke: ink,
            marker: ink,
            title: Color::WHITE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::light)
}
