// File: crates/trend-render-skia/tests/smoke.rs
// Purpose: End-to-end rasterization of a filtered chart: PNG header, frame size, repeatable pixels.

use std::sync::Arc;

use trend_core::{ChartRenderer, ControlEvent, FilterController, RawRecord, RecordSet, SeriesTransformer};
use trend_render_skia::{RasterOptions, SkiaRenderer};

fn records() -> RecordSet {
    RecordSet::new(vec![
        RawRecord::new("Arlington").with_column("Percentage (2009)", 5.0).with_column("Percentage (2010)", 7.0),
        RawRecord::new("Fairfax").with_column("Percentage (2009)", 10.0).with_column("Percentage (2010)", 12.0),
    ])
}

#[test]
fn render_smoke_png() {
    let renderer = ChartRenderer::default();
    let mut surface = renderer.surface();
    let mut ctl = FilterController::new(Arc::new(records()), SeriesTransformer::default(), renderer);
    ctl.refresh(&mut surface);

    let skia = SkiaRenderer::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    skia.render_to_png(&surface, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = skia.render_to_png_bytes(&surface).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn redraw_after_filter_round_trip_is_pixel_identical() {
    let renderer = ChartRenderer::default();
    let mut surface = renderer.surface();
    let mut ctl = FilterController::new(Arc::new(records()), SeriesTransformer::default(), renderer);
    let skia = SkiaRenderer::new(RasterOptions { draw_text: false });

    ctl.refresh(&mut surface);
    let before = skia.render_to_png_bytes(&surface).expect("before");
    ctl.handle(ControlEvent::CountiesChanged(vec!["Arlington".into()]), &mut surface);
    let filtered = skia.render_to_png_bytes(&surface).expect("filtered");
    ctl.handle(ControlEvent::Cleared, &mut surface);
    let after = skia.render_to_png_bytes(&surface).expect("after");

    let before = image::load_from_memory(&before).expect("decode before").to_rgba8();
    let filtered = image::load_from_memory(&filtered).expect("decode filtered").to_rgba8();
    let after = image::load_from_memory(&after).expect("decode after").to_rgba8();
    assert_eq!(before.dimensions(), (800, 450));
    assert_eq!(before.as_raw(), after.as_raw(), "clear should restore the initial pixels");
    assert_ne!(before.as_raw(), filtered.as_raw());
}
