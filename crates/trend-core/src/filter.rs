// File: crates/trend-core/src/filter.rs
// Summary: Filter selection state, control events, and the controller that re-runs the chart pipeline.

use std::sync::Arc;

use tracing::{error, info};

use crate::chart::ChartRenderer;
use crate::error::ChartError;
use crate::record::{RawRecord, RecordSet};
use crate::scale::{ScalePair, TemporalDomain};
use crate::series::SeriesTransformer;
use crate::surface::Surface;

/// Current narrowing criteria; empty counties and no year mean "everything".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub counties: Vec<String>,
    pub year: Option<String>,
}

impl FilterSelection {
    /// County membership AND a loose year match: any column name containing
    /// the year token as a substring.
    pub fn matches(&self, record: &RawRecord) -> bool {
        let county_ok = self.counties.is_empty() || self.counties.iter().any(|c| c == &record.category);
        let year_ok = match &self.year {
            None => true,
            Some(token) => record.column_names().any(|name| name.contains(token.as_str())),
        };
        county_ok && year_ok
    }

    pub fn apply(&self, records: &RecordSet) -> RecordSet {
        records.subset(|r| self.matches(r))
    }
}

/// Events emitted by the filter widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    CountiesChanged(Vec<String>),
    YearChanged(String),
    Cleared,
}

/// Option lists for the county multi-select and the year select.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlOptions {
    pub counties: Vec<String>,
    pub years: Vec<String>,
}

impl ControlOptions {
    pub fn from_records(records: &RecordSet, transformer: &SeriesTransformer) -> Self {
        Self { counties: records.categories(), years: transformer.year_tokens(records) }
    }
}

/// Widget side of the control surface.
pub trait FilterControls {
    /// Called once, after the dataset has loaded.
    fn populate(&mut self, options: &ControlOptions);
    /// Return every widget to its "all" state.
    fn reset(&mut self) {}
}

/// What a control event did to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    Rendered { series: usize, markers: usize },
    /// Nothing matched; the empty state was drawn.
    Empty,
    /// Input rejected; surface untouched.
    Rejected,
}

pub struct FilterController {
    records: Arc<RecordSet>,
    transformer: SeriesTransformer,
    renderer: ChartRenderer,
    selection: FilterSelection,
    temporal_override: Option<TemporalDomain>,
    scales: Option<ScalePair>,
}

impl FilterController {
    pub fn new(records: Arc<RecordSet>, transformer: SeriesTransformer, renderer: ChartRenderer) -> Self {
        Self {
            records,
            transformer,
            renderer,
            selection: FilterSelection::default(),
            temporal_override: None,
            scales: None,
        }
    }

    pub fn selection(&self) -> &FilterSelection { &self.selection }
    pub fn temporal_override(&self) -> Option<TemporalDomain> { self.temporal_override }
    /// Scales of the last successful render.
    pub fn scales(&self) -> Option<&ScalePair> { self.scales.as_ref() }
    pub fn renderer(&self) -> &ChartRenderer { &self.renderer }

    pub fn handle(&mut self, event: ControlEvent, surface: &mut Surface) -> Redraw {
        match event {
            ControlEvent::CountiesChanged(counties) => self.select_counties(counties, surface),
            ControlEvent::YearChanged(token) => self.select_year(&token, surface),
            ControlEvent::Cleared => self.clear(surface),
        }
    }

    /// Redraw for the current selection without a temporal override.
    pub fn refresh(&mut self, surface: &mut Surface) -> Redraw {
        self.temporal_override = None;
        let subset = self.selection.apply(&self.records);
        self.redraw(&subset, None, surface)
    }

    pub fn select_counties(&mut self, counties: Vec<String>, surface: &mut Surface) -> Redraw {
        let mut unique: Vec<String> = Vec::with_capacity(counties.len());
        for c in counties {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        self.selection.counties = unique;
        info!(counties = ?self.selection.counties, "county selection changed");
        self.refresh(surface)
    }

    /// One-year temporal window over the unfiltered records. Tokens that are
    /// not a 4-digit year are rejected without touching state or surface.
    pub fn select_year(&mut self, token: &str, surface: &mut Surface) -> Redraw {
        let domain = match TemporalDomain::for_year(token) {
            Ok(d) => d,
            Err(e) => {
                error!(error = %e, "invalid year selected");
                return Redraw::Rejected;
            }
        };
        self.selection.year = Some(token.to_string());
        self.temporal_override = Some(domain);
        info!(year = token, "year selection changed");
        let records = Arc::clone(&self.records);
        self.redraw(&records, Some(domain), surface)
    }

    pub fn clear(&mut self, surface: &mut Surface) -> Redraw {
        self.selection = FilterSelection::default();
        info!("filters cleared");
        self.refresh(surface)
    }

    fn redraw(&mut self, records: &RecordSet, temporal_override: Option<TemporalDomain>, surface: &mut Surface) -> Redraw {
        let series = self.transformer.transform(records);
        match self.renderer.scale_builder().build(&series, temporal_override) {
            Ok(scales) => {
                self.renderer.render(&series, &scales, surface);
                self.scales = Some(scales);
                Redraw::Rendered {
                    series: series.len(),
                    markers: series.iter().map(|s| s.values.len()).sum(),
                }
            }
            Err(ChartError::EmptyDomain) => {
                info!(records = records.len(), "nothing to plot; drawing empty state");
                self.renderer.render_empty(surface);
                self.scales = None;
                Redraw::Empty
            }
            Err(e) => {
                error!(error = %e, "failed to build scales");
                Redraw::Rejected
            }
        }
    }
}
