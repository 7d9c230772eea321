use std::collections::BTreeSet;

use super::model::HousingDataset;
use crate::chart::ChartKind;

// ---------------------------------------------------------------------------
// Year constraint
// ---------------------------------------------------------------------------

/// Which year control the side panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum YearMode {
    /// A single "built up to" slider.
    Cutoff,
    /// A closed `[from, to]` interval.
    #[default]
    Range,
}

/// Build-year predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    /// Rows built in or before the given year.
    UpTo(i32),
    /// Rows built within the closed interval.
    Between { lo: i32, hi: i32 },
}

impl YearFilter {
    /// The widest filter of the requested shape for the given bounds.
    pub fn full(mode: YearMode, bounds: Option<(i32, i32)>) -> Self {
        let (lo, hi) = bounds.unwrap_or((i32::MIN, i32::MAX));
        match mode {
            YearMode::Cutoff => YearFilter::UpTo(hi),
            YearMode::Range => YearFilter::Between { lo, hi },
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearFilter::UpTo(max) => year <= max,
            YearFilter::Between { lo, hi } => lo <= year && year <= hi,
        }
    }

    /// Swap an inverted interval and pull its outer edges in to the
    /// dataset's observed years. The set of matching years never changes,
    /// so a cutoff below the earliest year still matches nothing.
    pub fn normalized(self, bounds: Option<(i32, i32)>) -> Self {
        let (min, max) = bounds.unwrap_or((i32::MIN, i32::MAX));
        match self {
            YearFilter::UpTo(cutoff) => YearFilter::UpTo(cutoff.min(max)),
            YearFilter::Between { lo, hi } => {
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                YearFilter::Between {
                    lo: lo.max(min),
                    hi: hi.min(max),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state: the full set of control values
// ---------------------------------------------------------------------------

/// Current values of every dashboard control. Rebuilt on each interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub chart_kind: ChartKind,
    pub years: YearFilter,
    /// Selected neighborhoods. Empty means nothing is shown.
    pub neighborhoods: BTreeSet<String>,
}

impl FilterState {
    /// Initial controls: scatter chart, every year, every neighborhood.
    pub fn initial(dataset: &HousingDataset, mode: YearMode) -> Self {
        FilterState {
            chart_kind: ChartKind::Scatter,
            years: YearFilter::full(mode, dataset.year_bounds()),
            neighborhoods: dataset.neighborhoods().clone(),
        }
    }

    /// Clamp the year constraint and drop neighborhood names the dataset
    /// does not contain.
    pub fn normalized(&self, dataset: &HousingDataset) -> Self {
        let known = dataset.neighborhoods();
        let neighborhoods = self
            .neighborhoods
            .iter()
            .filter(|n| known.contains(*n))
            .cloned()
            .collect();

        FilterState {
            chart_kind: self.chart_kind,
            years: self.years.normalized(dataset.year_bounds()),
            neighborhoods,
        }
    }
}

/// Return indices of rows that pass both the year and neighborhood filters.
pub fn filtered_indices(dataset: &HousingDataset, filter: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.years.contains(r.year_built))
        .filter(|(_, r)| filter.neighborhoods.contains(&r.neighborhood))
        .map(|(i, _)| i)
        .collect()
}
