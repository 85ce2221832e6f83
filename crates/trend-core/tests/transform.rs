// File: crates/trend-core/tests/transform.rs
// Purpose: Series transform properties: one series per county, ordered years, lenient values, filter round-trip.

use chrono::NaiveDate;
use trend_core::{Cell, FilterSelection, RawRecord, RecordSet, ScaleBuilder, SeriesTransformer};

fn ymd(y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
}

fn two_counties() -> RecordSet {
    RecordSet::new(vec![
        RawRecord::new("Arlington").with_column("Percentage (2009)", 5.0).with_column("Percentage (2010)", 7.0),
        RawRecord::new("Fairfax").with_column("Percentage (2009)", 10.0).with_column("Percentage (2010)", 12.0),
    ])
}

#[test]
fn scenario_two_counties_two_years() {
    let series = SeriesTransformer::default().transform(&two_counties());
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "Arlington");
    assert_eq!(series[1].name, "Fairfax");
    for s in &series {
        assert_eq!(s.values.len(), 2);
    }
    let values: Vec<f64> = series[1].values.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![10.0, 12.0]);

    let scales = ScaleBuilder::new(730.0, 390.0).build(&series, None).expect("scales");
    assert!(scales.value.vmax >= 12.0);
    assert_eq!(scales.value.vmin, 0.0);
    assert_eq!(scales.temporal.domain.start, ymd(2009));
    assert_eq!(scales.temporal.domain.end, ymd(2010));
}

#[test]
fn series_count_matches_distinct_counties() {
    let records = RecordSet::new(vec![
        RawRecord::new("A").with_column("Percentage (2009)", 1.0),
        RawRecord::new("B").with_column("Percentage (2009)", 2.0),
        RawRecord::new("A").with_column("Percentage (2009)", 3.0),
        RawRecord::new("C").with_column("Percentage (2009)", 4.0),
    ]);
    let series = SeriesTransformer::default().transform(&records);
    assert_eq!(series.len(), 3);
    // duplicates read from the first matching record
    assert_eq!(series[0].values[0].value, 1.0);
}

#[test]
fn points_sorted_by_year_even_when_columns_are_not() {
    // "Percentage (2011)" sorts before "Percentage - old (2009)" by name
    let records = RecordSet::new(vec![RawRecord::new("A")
        .with_column("Percentage (2011)", 3.0)
        .with_column("Percentage - old (2009)", 1.0)
        .with_column("Percentage (2010)", 2.0)]);
    let series = SeriesTransformer::default().transform(&records);
    let years: Vec<NaiveDate> = series[0].years().collect();
    assert_eq!(years, vec![ymd(2009), ymd(2010), ymd(2011)]);
    let values: Vec<f64> = series[0].values.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn non_numeric_cells_become_zero() {
    let records = RecordSet::new(vec![RawRecord::new("A")
        .with_column("Percentage (2009)", "abc")
        .with_column("Percentage (2010)", Cell::Null)
        .with_column("Percentage (2011)", "3.5")
        .with_column("COUNT (2011)", 99.0)
        .with_column("Name", "ignored")]);
    let series = SeriesTransformer::default().transform(&records);
    let values: Vec<f64> = series[0].values.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0.0, 0.0, 3.5]);
}

#[test]
fn filtering_commutes_with_transform() {
    let records = two_counties();
    let full = SeriesTransformer::default().transform(&records);
    let picked: Vec<_> = full.into_iter().filter(|s| s.name == "Arlington").collect();

    let selection = FilterSelection { counties: vec!["Arlington".into()], year: None };
    let prefiltered = SeriesTransformer::default().transform(&selection.apply(&records));
    assert_eq!(picked, prefiltered);
}

#[test]
fn empty_input_yields_no_series() {
    let t = SeriesTransformer::default();
    assert!(t.transform(&RecordSet::default()).is_empty());
    assert!(t.year_tokens(&RecordSet::default()).is_empty());
}

#[test]
fn custom_marker_selects_other_columns() {
    let records = RecordSet::new(vec![RawRecord::new("A")
        .with_column("Rate (2012)", 4.0)
        .with_column("Percentage (2012)", 9.0)]);
    let series = SeriesTransformer::new("Rate").transform(&records);
    assert_eq!(series[0].values.len(), 1);
    assert_eq!(series[0].values[0].value, 4.0);
}

#[test]
fn year_tokens_are_sorted_and_distinct() {
    let records = RecordSet::new(vec![RawRecord::new("A")
        .with_column("Percentage (2011)", 3.0)
        .with_column("Percentage - old (2009)", 1.0)
        .with_column("Percentage (2010)", 2.0)]);
    assert_eq!(SeriesTransformer::default().year_tokens(&records), vec!["2009", "2010", "2011"]);
}
