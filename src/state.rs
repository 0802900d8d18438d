use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::aggregate::Summary;
use crate::data::cache::DatasetCache;
use crate::data::export;
use crate::data::filter::{apply, FilterParams, FilteredView};
use crate::data::model::Dataset;
use crate::presenter::bucket_label;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session-owned dataset memo; every load goes through it.
    cache: DatasetCache,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    /// Current widget values.
    pub filters: FilterParams,

    /// Indices of titles passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart data for the visible titles.
    pub summary: Summary,

    /// Bar colours per content type and per rating, built from the whole
    /// dataset so they stay put while filtering.
    pub type_colors: ColorMap,
    pub rating_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_filters(FilterParams::default())
    }
}

impl AppState {
    /// Empty state with initial filter values (e.g. from the command line).
    pub fn with_filters(filters: FilterParams) -> Self {
        Self {
            cache: DatasetCache::new(),
            dataset: None,
            filters,
            visible_indices: Vec::new(),
            summary: Summary::default(),
            type_colors: ColorMap::new(std::iter::empty()),
            rating_colors: ColorMap::new(std::iter::empty()),
            status_message: None,
        }
    }

    /// Load `path` through the cache and make it the current dataset.
    /// On failure the previous dataset is dropped and the error is shown.
    pub fn open(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                log::info!(
                    "Showing {} titles from {}",
                    dataset.len(),
                    dataset.source.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.visible_indices.clear();
                self.summary = Summary::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.dataset.as_ref().map(|ds| ds.source.clone()) {
            self.cache.evict(&path);
            self.open(&path);
        }
    }

    /// Ingest a loaded dataset and apply the current filters to it.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.rebuild_color_maps(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Rebuild the category colour maps from every title in `dataset`.
    pub fn rebuild_color_maps(&mut self, dataset: &Dataset) {
        self.type_colors = ColorMap::new(dataset.titles.iter().map(|t| t.kind.as_str()));
        self.rating_colors = ColorMap::new(
            dataset
                .titles
                .iter()
                .map(|t| bucket_label(t.rating.as_deref())),
        );
    }

    /// Recompute `visible_indices` and `summary` after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let view = apply(ds, &self.filters);
        self.summary = Summary::from_view(&view);
        self.visible_indices = view.indices().to_vec();
    }

    /// Replace the filters, recomputing only when something changed.
    pub fn set_filters(&mut self, filters: FilterParams) {
        if filters != self.filters {
            self.filters = filters;
            self.refilter();
        }
    }

    /// Back to "show everything".
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterParams::default());
    }

    /// The currently visible rows.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| FilteredView::from_indices(ds, self.visible_indices.clone()))
    }

    /// CSV bytes for the visible rows.
    pub fn export_csv(&self) -> Result<Vec<u8>> {
        let view = self.view().context("no dataset loaded")?;
        Ok(export::serialize(&view)?)
    }

    /// Write the visible rows to `path`, reporting the outcome in the status line.
    pub fn save_export(&mut self, path: &Path) {
        let result = match self.view() {
            Some(view) => export::write_to(&view, path),
            None => Err(anyhow::anyhow!("no dataset loaded")),
        };
        self.status_message = match result {
            Ok(n) => Some(format!("Saved {n} rows to {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Some(format!("Error: {e:#}"))
            }
        };
    }
}
