// File: crates/trend-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms and the scale builder that derives them from series.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::axis::Tick;
use crate::error::{ChartError, Result};
use crate::grid::{format_tick, linear_ticks, nice, tick_increment};
use crate::series::{parse_year, Series};

/// Target tick count handed to the nicing and tick helpers.
pub const TICK_COUNT: usize = 10;

/// Inclusive calendar span mapped onto the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemporalDomain {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TemporalDomain {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b { Self { start: a, end: b } } else { Self { start: b, end: a } }
    }

    /// `[year-01-01, (year+1)-01-01]` for a 4-digit year token.
    pub fn for_year(token: &str) -> Result<Self> {
        let invalid = || ChartError::InvalidYearSelection { token: token.to_string() };
        let start = parse_year(token).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(start.year() + 1, 1, 1).ok_or_else(invalid)?;
        Ok(Self { start, end })
    }

    fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn days(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

/// Horizontal calendar scale mapping a date onto [left_px, right_px].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub domain: TemporalDomain,
    pub left_px: f32,
    pub right_px: f32,
}

impl TimeScale {
    pub fn new(domain: TemporalDomain, left_px: f32, right_px: f32) -> Self {
        Self { domain, left_px, right_px }
    }

    #[inline]
    pub fn to_px(&self, d: NaiveDate) -> f32 {
        let span = (days(self.domain.end) - days(self.domain.start)).max(1.0);
        let t = (days(d) - days(self.domain.start)) / span;
        self.left_px + t as f32 * (self.right_px - self.left_px)
    }

    /// Yearly ticks for multi-year domains, monthly ticks for shorter ones.
    pub fn ticks(&self) -> Vec<Tick> {
        let TemporalDomain { start, end } = self.domain;
        if self.domain.span_days() >= 2 * 365 {
            let first = if start.ordinal() == 1 { start.year() } else { start.year() + 1 };
            let last = end.year();
            let count = (last - first + 1).max(0) as usize;
            let step = [1, 2, 5, 10, 20, 50, 100, 200, 500]
                .into_iter()
                .find(|&s| count / s as usize <= TICK_COUNT)
                .unwrap_or(1000);
            (first..=last)
                .filter(|y| y.rem_euclid(step) == 0)
                .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .map(|d| Tick { pos: self.to_px(d), label: d.format("%Y").to_string() })
                .collect()
        } else {
            let mut out = Vec::new();
            let (mut y, mut m) = if start.day() == 1 {
                (start.year(), start.month())
            } else if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            while let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
                if d > end {
                    break;
                }
                let label = if m == 1 { d.format("%Y") } else { d.format("%B") };
                out.push(Tick { pos: self.to_px(d), label: label.to_string() });
                if m == 12 { y += 1; m = 1; } else { m += 1; }
            }
            out
        }
    }
}

/// Vertical linear scale mapping [vmin, vmax] to [bottom_px, top_px].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// Same scale with the domain expanded outward to round numbers.
    pub fn niced(self) -> Self {
        let (vmin, vmax) = nice(self.vmin, self.vmax, TICK_COUNT);
        Self { vmin, vmax, ..self }
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    pub fn ticks(&self) -> Vec<Tick> {
        let step = tick_increment(self.vmin, self.vmax, TICK_COUNT);
        let step = if step < 0.0 { -1.0 / step } else { step };
        linear_ticks(self.vmin, self.vmax, TICK_COUNT)
            .into_iter()
            .map(|v| Tick { pos: self.to_px(v), label: format_tick(v, step) })
            .collect()
    }
}

/// The two independent axis scales of one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePair {
    pub temporal: TimeScale,
    pub value: ValueScale,
}

/// Derives scales for a chart body of `width` × `height` pixels.
#[derive(Clone, Copy, Debug)]
pub struct ScaleBuilder {
    pub width: f32,
    pub height: f32,
}

impl ScaleBuilder {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Temporal domain from `temporal_override` or the union of series years;
    /// value domain `[0, max]` niced.
    pub fn build(&self, series: &[Series], temporal_override: Option<TemporalDomain>) -> Result<ScalePair> {
        if series.is_empty() {
            return Err(ChartError::EmptyDomain);
        }
        let domain = match temporal_override {
            Some(d) => d,
            None => year_extent(series).ok_or(ChartError::EmptyDomain)?,
        };
        let vmax = series
            .iter()
            .filter_map(Series::max_value)
            .fold(0.0f64, f64::max);
        let vmax = if vmax.is_finite() && vmax > 0.0 { vmax } else { 1.0 };

        let temporal = TimeScale::new(domain, 0.0, self.width);
        let value = ValueScale::new_linear(0.0, self.height, 0.0, vmax).niced();
        debug!(start = %domain.start, end = %domain.end, vmax = value.vmax, "built scales");
        Ok(ScalePair { temporal, value })
    }
}

/// Extent over every series' years; single-year data is widened by one year.
/// Series built by `SeriesTransformer` always share one year set, so the
/// mismatch warning only fires for series handed to `ScaleBuilder` directly.
fn year_extent(series: &[Series]) -> Option<TemporalDomain> {
    if let Some(first) = series.first() {
        let reference: Vec<NaiveDate> = first.years().collect();
        if series.iter().skip(1).any(|s| !s.years().eq(reference.iter().copied())) {
            warn!("series do not share one year set; using the union of years");
        }
    }
    let min = series.iter().filter_map(|s| s.year_extent()).map(|(a, _)| a).min()?;
    let max = series.iter().filter_map(|s| s.year_extent()).map(|(_, b)| b).max()?;
    if min == max {
        let end = NaiveDate::from_ymd_opt(min.year() + 1, 1, 1).unwrap_or(max);
        return Some(TemporalDomain::new(min, end));
    }
    Some(TemporalDomain::new(min, max))
}
