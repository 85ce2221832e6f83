// File: crates/trend-core/src/types.rs
// Summary: Shared layout types and constants (frame size, margins).

use serde::Deserialize;

/// Default outer frame width in pixels.
pub const WIDTH: u32 = 800;
/// Default outer frame height in pixels.
pub const HEIGHT: u32 = 450;

/// Screen margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(40, 30, 20, 40)
    }
}

/// Outer frame plus margins; the chart body is what remains inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
}

impl Layout {
    pub fn body_width(&self) -> f32 {
        self.width.saturating_sub(self.insets.hsum()) as f32
    }
    pub fn body_height(&self) -> f32 {
        self.height.saturating_sub(self.insets.vsum()) as f32
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default() }
    }
}
