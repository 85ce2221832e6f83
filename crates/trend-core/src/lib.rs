// File: crates/trend-core/src/lib.rs
// Summary: Core library entry point; exports the record → series → scales → surface pipeline and filter controller.

pub mod app;
pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod record;
pub mod scale;
pub mod series;
pub mod store;
pub mod surface;
pub mod theme;
pub mod types;

pub use app::TrendChart;
pub use axis::{Axis, AxisOrient, Tick};
pub use chart::{ChartRenderer, RenderOptions};
pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use filter::{ControlEvent, ControlOptions, FilterControls, FilterController, FilterSelection, Redraw};
pub use record::{Cell, RawRecord, RecordSet};
pub use scale::{ScaleBuilder, ScalePair, TemporalDomain, TimeScale, ValueScale};
pub use series::{Series, SeriesTransformer, TimePoint};
pub use store::{DatasetCodec, DatasetFormat, DatasetSource, FileSource, HttpSource, RecordSource, RecordStore};
pub use surface::{Element, Surface, TextAnchor, TextElement};
pub use theme::{Color, Theme};
