// File: crates/trend-core/src/axis.rs
// Summary: Axis model with orientation, tick marks and labels.

use crate::scale::{TimeScale, ValueScale};

/// Tick mark position (pixels along the axis) and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub pos: f32,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    /// Horizontal, ticks hanging below the line.
    Bottom,
    /// Vertical, ticks pointing left of the line.
    Left,
}

/// Rendered axis: a domain line from `start_px` to `end_px` at `offset`
/// (y for bottom axes, x for left axes) plus its ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    pub offset: f32,
    pub start_px: f32,
    pub end_px: f32,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Bottom axis for the temporal scale, drawn at `y`.
    pub fn bottom(scale: &TimeScale, y: f32) -> Self {
        Self {
            orient: AxisOrient::Bottom,
            offset: y,
            start_px: scale.left_px,
            end_px: scale.right_px,
            ticks: scale.ticks(),
        }
    }

    /// Left axis for the value scale, drawn at x = 0.
    pub fn left(scale: &ValueScale) -> Self {
        Self {
            orient: AxisOrient::Left,
            offset: 0.0,
            start_px: scale.bottom_px,
            end_px: scale.top_px,
            ticks: scale.ticks(),
        }
    }
}
