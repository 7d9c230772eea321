use std::path::Path;
use std::sync::Arc;

use crate::chart::ChartKind;
use crate::color::ColorMap;
use crate::data::clean::CleanReport;
use crate::data::filter::{FilterState, YearFilter, YearMode};
use crate::data::model::HousingDataset;
use crate::error::DashError;
use crate::resolve::{ViewResult, resolve};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Never mutated in place.
    pub dataset: Option<Arc<HousingDataset>>,

    /// Which year control the side panel shows.
    pub year_mode: YearMode,

    /// Selected chart kind, kept across dataset reloads.
    pub chart_kind: ChartKind,

    /// Current control values.
    pub filters: Option<FilterState>,

    /// Chart and caption for the current controls.
    pub view: Option<ViewResult>,

    /// Colours per overall quality level (scatter).
    pub quality_colors: ColorMap<u8>,

    /// Colours per neighborhood (box plot).
    pub neighborhood_colors: ColorMap<String>,

    /// Last rejected chart value, kept until a valid chart is chosen so a
    /// later load does not hide it.
    pub selection_error: Option<DashError>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(year_mode: YearMode) -> Self {
        Self {
            dataset: None,
            year_mode,
            chart_kind: ChartKind::Scatter,
            filters: None,
            view: None,
            quality_colors: ColorMap::sequential(std::iter::empty()),
            neighborhood_colors: ColorMap::categorical(std::iter::empty()),
            selection_error: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, initialise controls and colours.
    pub fn set_dataset(&mut self, report: CleanReport) {
        let dataset = Arc::new(report.dataset);

        let levels: Vec<u8> = dataset.records().iter().map(|r| r.overall_quality).collect();
        self.quality_colors = ColorMap::sequential(&levels);
        self.neighborhood_colors = ColorMap::categorical(dataset.neighborhoods());

        self.filters = Some(FilterState {
            chart_kind: self.chart_kind,
            ..FilterState::initial(&dataset, self.year_mode)
        });
        let notes: Vec<String> = self
            .selection_error
            .iter()
            .map(ToString::to_string)
            .chain((report.dropped_rows > 0).then(|| format!("{} incomplete rows skipped", report.dropped_rows)))
            .collect();
        self.status_message = (!notes.is_empty()).then(|| notes.join("; "));
        self.dataset = Some(dataset);
        self.refresh();
    }

    /// Load a file from disk and install it, reporting failures in the
    /// status line.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(report) => {
                log::info!(
                    "Loaded {} rows ({} neighborhoods, {} lot frontage values imputed) from {}",
                    report.dataset.len(),
                    report.dataset.neighborhoods().len(),
                    report.imputed_frontage,
                    path.display()
                );
                self.set_dataset(report);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run the resolver from scratch for the current controls.
    pub fn refresh(&mut self) {
        self.view = match (&self.dataset, &self.filters) {
            (Some(ds), Some(filters)) => Some(resolve(ds, filters)),
            _ => None,
        };
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart_kind = kind;
        if self.selection_error.take().is_some() {
            self.status_message = None;
        }
        if let Some(filters) = &mut self.filters {
            filters.chart_kind = kind;
        }
        self.refresh();
    }

    /// Apply a raw chart-kind value (e.g. from the command line). Unknown
    /// values keep the current chart and show the error inline.
    pub fn select_chart_value(&mut self, value: &str) {
        match value.parse::<ChartKind>() {
            Ok(kind) => self.set_chart_kind(kind),
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(e.to_string());
                self.selection_error = Some(e);
            }
        }
    }

    pub fn set_years(&mut self, years: YearFilter) {
        if let Some(filters) = &mut self.filters {
            filters.years = years;
        }
        self.refresh();
    }

    /// Toggle a single neighborhood in the checklist.
    pub fn toggle_neighborhood(&mut self, name: &str) {
        if let Some(filters) = &mut self.filters {
            if !filters.neighborhoods.remove(name) {
                filters.neighborhoods.insert(name.to_string());
            }
        }
        self.refresh();
    }

    /// Select every neighborhood.
    pub fn select_all(&mut self) {
        if let (Some(ds), Some(filters)) = (&self.dataset, &mut self.filters) {
            filters.neighborhoods = ds.neighborhoods().clone();
        }
        self.refresh();
    }

    /// Deselect every neighborhood.
    pub fn select_none(&mut self) {
        if let Some(filters) = &mut self.filters {
            filters.neighborhoods.clear();
        }
        self.refresh();
    }
}
