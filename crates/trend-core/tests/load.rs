// File: crates/trend-core/tests/load.rs
// Purpose: Async dataset loading (JSON/CSV files and HTTP), control population, and the load-failure state.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use trend_core::{
    ChartConfig, ChartError, ControlEvent, ControlOptions, DatasetSource, FilterControls, Redraw, TrendChart,
};

#[derive(Default)]
struct RecordingControls {
    options: Option<ControlOptions>,
    resets: usize,
}

impl FilterControls for RecordingControls {
    fn populate(&mut self, options: &ControlOptions) {
        self.options = Some(options.clone());
    }
    fn reset(&mut self) {
        self.resets += 1;
    }
}

const YEARS_JSON: &str = r#"{
  "Years": [
    { "COUNTY": "Arlington", "Percentage (2010)": 7, "Percentage (2009)": 5 },
    { "COUNTY": "Fairfax", "Percentage (2009)": 10, "Percentage (2010)": "12" }
  ]
}"#;

fn write_fixture(suffix: &str, body: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(body.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn config_for(path: &std::path::Path) -> ChartConfig {
    ChartConfig { dataset: path.display().to_string(), ..ChartConfig::default() }
}

#[tokio::test]
async fn json_load_builds_chart_and_populates_controls() -> Result<()> {
    let file = write_fixture(".json", YEARS_JSON)?;
    let cfg = config_for(file.path());
    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();

    let r = chart.load(&DatasetSource::from_config(&cfg), &mut controls).await?;
    assert_eq!(r, Redraw::Rendered { series: 2, markers: 4 });
    assert!(chart.is_loaded());
    assert_eq!(chart.surface().line_paths().count(), 2);

    let options = controls.options.expect("controls populated");
    assert_eq!(options.counties, vec!["Arlington".to_string(), "Fairfax".to_string()]);
    assert_eq!(options.years, vec!["2009".to_string(), "2010".to_string()]);
    Ok(())
}

#[tokio::test]
async fn csv_load_uses_the_same_pipeline() -> Result<()> {
    let file = write_fixture(
        ".csv",
        "COUNTY,Percentage (2009),Percentage (2010)\nArlington,5,7\nFairfax,10,12\nLoudoun,3,n/a\n",
    )?;
    let cfg = config_for(file.path());
    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();

    let r = chart.load(&DatasetSource::from_config(&cfg), &mut controls).await?;
    assert_eq!(r, Redraw::Rendered { series: 3, markers: 6 });
    Ok(())
}

#[tokio::test]
async fn clear_event_resets_widgets() -> Result<()> {
    let file = write_fixture(".json", YEARS_JSON)?;
    let cfg = config_for(file.path());
    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();
    chart.load(&DatasetSource::from_config(&cfg), &mut controls).await?;

    chart.handle(ControlEvent::CountiesChanged(vec!["Fairfax".into()]), &mut controls);
    assert_eq!(chart.surface().line_paths().count(), 1);
    let r = chart.handle(ControlEvent::Cleared, &mut controls);
    assert_eq!(r, Redraw::Rendered { series: 2, markers: 4 });
    assert_eq!(controls.resets, 1);
    Ok(())
}

#[tokio::test]
async fn missing_file_shows_error_state() {
    let cfg = ChartConfig { dataset: "definitely/not/here/years.json".into(), ..ChartConfig::default() };
    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();

    let err = chart.load(&DatasetSource::from_config(&cfg), &mut controls).await.unwrap_err();
    assert!(matches!(err, ChartError::Load { .. }));
    assert!(!chart.is_loaded());
    assert!(controls.options.is_none());
    assert_eq!(chart.surface().line_paths().count(), 0);
    assert!(chart.surface().texts().any(|t| t.content.starts_with(&cfg.labels.error)));

    // events before a successful load are ignored
    let r = chart.handle(ControlEvent::YearChanged("2010".into()), &mut controls);
    assert_eq!(r, Redraw::Rejected);
}

#[tokio::test]
async fn record_without_county_fails_to_load() -> Result<()> {
    let file = write_fixture(".json", r#"{"Years": [{"Percentage (2009)": 1}]}"#)?;
    let cfg = config_for(file.path());
    let mut chart = TrendChart::new(&cfg);
    let err = chart
        .load(&DatasetSource::from_config(&cfg), &mut RecordingControls::default())
        .await
        .unwrap_err();
    match err {
        ChartError::Load { source, .. } => assert!(matches!(*source, ChartError::MissingCategory { index: 0, .. })),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

/// Serves `body` at `/years.json` and 404 for any other path; returns the base URL.
async fn serve_dataset(body: &'static str) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let path = request.split_whitespace().nth(1).unwrap_or("/");
            let (status, payload) = if path == "/years.json" { ("200 OK", body) } else { ("404 Not Found", "") };
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                payload.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    Ok(base)
}

#[tokio::test]
async fn http_location_loads_like_a_file() -> Result<()> {
    let base = serve_dataset(YEARS_JSON).await?;
    let cfg = ChartConfig { dataset: format!("{base}/years.json"), ..ChartConfig::default() };
    let source = DatasetSource::from_config(&cfg);
    assert!(matches!(source, DatasetSource::Http(_)));

    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();
    let r = chart.load(&source, &mut controls).await?;
    assert_eq!(r, Redraw::Rendered { series: 2, markers: 4 });

    let options = controls.options.expect("controls populated");
    assert_eq!(options.counties, vec!["Arlington".to_string(), "Fairfax".to_string()]);
    assert_eq!(options.years, vec!["2009".to_string(), "2010".to_string()]);
    Ok(())
}

#[tokio::test]
async fn http_not_found_is_a_load_error() -> Result<()> {
    let base = serve_dataset(YEARS_JSON).await?;
    let cfg = ChartConfig { dataset: format!("{base}/missing.json"), ..ChartConfig::default() };
    let mut chart = TrendChart::new(&cfg);
    let mut controls = RecordingControls::default();

    let err = chart.load(&DatasetSource::from_config(&cfg), &mut controls).await.unwrap_err();
    match err {
        ChartError::Load { location, source } => {
            assert!(location.ends_with("/missing.json"));
            match *source {
                ChartError::Http(e) => assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND)),
                other => panic!("unexpected source: {other}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!chart.is_loaded());
    assert!(controls.options.is_none());
    Ok(())
}
