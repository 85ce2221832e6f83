// File: crates/trend-core/src/app.rs
// Summary: Application shell wiring load → initial chart → control population → event handling.

use std::sync::Arc;

use tracing::warn;

use crate::chart::{ChartRenderer, RenderOptions};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::filter::{ControlEvent, ControlOptions, FilterControls, FilterController, Redraw};
use crate::record::RecordSet;
use crate::series::SeriesTransformer;
use crate::store::{RecordSource, RecordStore};
use crate::surface::Surface;

/// One chart on one surface, driven by control events once its data is loaded.
pub struct TrendChart {
    renderer: ChartRenderer,
    transformer: SeriesTransformer,
    surface: Surface,
    controller: Option<FilterController>,
}

impl TrendChart {
    pub fn new(cfg: &ChartConfig) -> Self {
        let renderer = ChartRenderer::new(RenderOptions::from_config(cfg));
        let surface = renderer.surface();
        Self {
            renderer,
            transformer: SeriesTransformer::new(cfg.value_marker.clone()),
            surface,
            controller: None,
        }
    }

    /// Fetch the dataset, draw the initial chart and populate `controls`.
    /// A failed load leaves the error state on the surface and returns the error.
    pub async fn load<S, C>(&mut self, source: &S, controls: &mut C) -> Result<Redraw>
    where
        S: RecordSource,
        C: FilterControls,
    {
        match RecordStore::load(source).await {
            Ok(store) => Ok(self.attach(store, controls)),
            Err(e) => {
                self.renderer.render_error(&mut self.surface, &e.to_string());
                Err(e)
            }
        }
    }

    /// Same as a successful `load`, for records already in memory.
    pub fn attach<C: FilterControls>(&mut self, store: RecordStore, controls: &mut C) -> Redraw {
        let records: Arc<RecordSet> = Arc::clone(store.records());
        let mut controller = FilterController::new(Arc::clone(&records), self.transformer.clone(), self.renderer.clone());
        let redraw = controller.refresh(&mut self.surface);
        controls.populate(&ControlOptions::from_records(&records, &self.transformer));
        self.controller = Some(controller);
        redraw
    }

    pub fn handle<C: FilterControls>(&mut self, event: ControlEvent, controls: &mut C) -> Redraw {
        let Some(controller) = self.controller.as_mut() else {
            warn!(?event, "control event before the dataset loaded; ignored");
            return Redraw::Rejected;
        };
        if event == ControlEvent::Cleared {
            controls.reset();
        }
        controller.handle(event, &mut self.surface)
    }

    pub fn surface(&self) -> &Surface { &self.surface }
    pub fn controller(&self) -> Option<&FilterController> { self.controller.as_ref() }
    pub fn is_loaded(&self) -> bool { self.controller.is_some() }
}
