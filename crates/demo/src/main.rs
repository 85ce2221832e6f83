// File: crates/demo/src/main.rs
// Summary: Demo loads a county dataset, draws the chart, replays filter events and writes one PNG + SVG per frame.
// Usage: trend-demo [dataset] [county=A,B | year=YYYY | clear]...

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use trend_core::{ChartConfig, ControlEvent, ControlOptions, DatasetSource, FilterControls, Redraw, Surface, TrendChart};
use trend_render_skia::SkiaRenderer;

/// Stand-in for the page widgets: logs what it would show.
#[derive(Default)]
struct ConsoleControls {
    options: ControlOptions,
}

impl FilterControls for ConsoleControls {
    fn populate(&mut self, options: &ControlOptions) {
        info!(counties = options.counties.len(), years = ?options.years, "filter controls populated");
        self.options = options.clone();
    }

    fn reset(&mut self) {
        info!("filter controls reset");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let mut cfg = match std::env::var("TREND_CHART_CONFIG") {
        Ok(path) => ChartConfig::from_yaml_file(&path).with_context(|| format!("reading config {path}"))?,
        Err(_) => ChartConfig::default(),
    };

    let mut args = std::env::args().skip(1);
    if let Some(location) = args.next() {
        cfg.dataset = location;
    }
    let events = args.map(|a| parse_event(&a)).collect::<Result<Vec<_>>>()?;
    info!(dataset = %cfg.dataset, events = events.len(), "starting");

    let out_dir = PathBuf::from("target/out");
    let skia = SkiaRenderer::default();
    let mut chart = TrendChart::new(&cfg);
    let mut controls = ConsoleControls::default();

    let source = DatasetSource::from_config(&cfg);
    if let Err(e) = chart.load(&source, &mut controls).await {
        write_frame(&skia, chart.surface(), &out_dir, "error")?;
        return Err(e).with_context(|| format!("failed to load '{}'", cfg.dataset));
    }
    info!(counties = %controls.options.counties.join(", "), "counties available");
    write_frame(&skia, chart.surface(), &out_dir, "00_initial")?;

    for (i, event) in events.into_iter().enumerate() {
        let name = frame_name(i + 1, &event);
        match chart.handle(event, &mut controls) {
            Redraw::Rejected => warn!(frame = %name, "event rejected; chart unchanged"),
            redraw => {
                info!(frame = %name, ?redraw, "redrawn");
                write_frame(&skia, chart.surface(), &out_dir, &name)?;
            }
        }
    }
    Ok(())
}

/// `county=A,B` (empty list = all), `year=YYYY`, or `clear`.
fn parse_event(arg: &str) -> Result<ControlEvent> {
    if arg == "clear" {
        return Ok(ControlEvent::Cleared);
    }
    match arg.split_once('=') {
        Some(("county", list)) => Ok(ControlEvent::CountiesChanged(
            list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect(),
        )),
        Some(("year", year)) => Ok(ControlEvent::YearChanged(year.trim().to_string())),
        _ => anyhow::bail!("unrecognized event '{arg}' (expected county=A,B | year=YYYY | clear)"),
    }
}

fn frame_name(index: usize, event: &ControlEvent) -> String {
    let what = match event {
        ControlEvent::CountiesChanged(c) if c.is_empty() => "county_all".to_string(),
        ControlEvent::CountiesChanged(c) => format!("county_{}", c.len()),
        ControlEvent::YearChanged(y) => format!("year_{}", y.replace(|ch: char| !ch.is_ascii_alphanumeric(), "_")),
        ControlEvent::Cleared => "clear".to_string(),
    };
    format!("{index:02}_{what}")
}

fn write_frame(skia: &SkiaRenderer, surface: &Surface, dir: &Path, name: &str) -> Result<()> {
    let png = dir.join(format!("chart_{name}.png"));
    skia.render_to_png(surface, &png)?;
    let svg = png.with_extension("svg");
    std::fs::write(&svg, surface.to_svg()).with_context(|| format!("writing {}", svg.display()))?;
    println!("Wrote {}", png.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_parse() {
        assert_eq!(parse_event("clear").unwrap(), ControlEvent::Cleared);
        assert_eq!(parse_event("year=2010").unwrap(), ControlEvent::YearChanged("2010".into()));
        assert_eq!(
            parse_event("county=Arlington, Fairfax").unwrap(),
            ControlEvent::CountiesChanged(vec!["Arlington".into(), "Fairfax".into()])
        );
        assert_eq!(parse_event("county=").unwrap(), ControlEvent::CountiesChanged(vec![]));
        assert!(parse_event("zoom=2").is_err());
    }

    #[test]
    fn frame_names_are_file_safe() {
        assert_eq!(frame_name(3, &ControlEvent::YearChanged("20/0".into())), "03_year_20_0");
        assert_eq!(frame_name(1, &ControlEvent::Cleared), "01_clear");
    }
}
