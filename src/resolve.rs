use std::collections::{BTreeMap, BTreeSet};

use crate::chart::{BoxStats, ChartKind, ChartSpec, HISTOGRAM_BINS, Histogram, ScatterPoint, summary_for};
use crate::data::filter::{FilterState, YearFilter, filtered_indices};
use crate::data::model::{HousingDataset, HousingRecord};
use crate::error::DashError;

// ---------------------------------------------------------------------------
// Resolver: control values → chart spec + caption
// ---------------------------------------------------------------------------

/// Whether the resolved chart has anything to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Ready,
    /// The filters matched no rows. The chart is still valid, just empty.
    EmptyResult,
}

/// Output of one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult {
    pub spec: ChartSpec,
    pub summary: &'static str,
    /// Rows left after filtering.
    pub matched_rows: usize,
}

impl ViewResult {
    pub fn status(&self) -> ViewStatus {
        if self.matched_rows == 0 {
            ViewStatus::EmptyResult
        } else {
            ViewStatus::Ready
        }
    }
}

/// Resolve the view for a set of control values.
///
/// Pure: reads the dataset, allocates a fresh spec, and never fails. The
/// filter is normalised first (years clamped, unknown neighborhoods ignored).
pub fn resolve(dataset: &HousingDataset, filter: &FilterState) -> ViewResult {
    let filter = filter.normalized(dataset);
    let indices = filtered_indices(dataset, &filter);
    let rows: Vec<&HousingRecord> = indices.iter().map(|&i| &dataset.records()[i]).collect();

    let spec = match filter.chart_kind {
        ChartKind::Scatter => scatter(&rows),
        ChartKind::Histogram => histogram(&rows),
        ChartKind::BoxPlot => box_plot(&rows),
    };

    log::debug!(
        "Resolved {} chart: {} of {} rows",
        filter.chart_kind,
        rows.len(),
        dataset.len()
    );

    ViewResult {
        spec,
        summary: summary_for(filter.chart_kind),
        matched_rows: rows.len(),
    }
}

/// Resolve from raw dropdown input. An unrecognised chart kind fails with
/// [`DashError::InvalidSelection`] before any filtering happens.
pub fn resolve_selection(
    dataset: &HousingDataset,
    chart_kind: &str,
    years: YearFilter,
    neighborhoods: BTreeSet<String>,
) -> Result<ViewResult, DashError> {
    let filter = FilterState {
        chart_kind: chart_kind.parse()?,
        years,
        neighborhoods,
    };
    Ok(resolve(dataset, &filter))
}

fn scatter(rows: &[&HousingRecord]) -> ChartSpec {
    let points = rows
        .iter()
        .map(|r| ScatterPoint {
            living_area: r.living_area,
            sale_price: r.sale_price,
            quality: r.overall_quality,
            neighborhood: r.neighborhood.clone(),
        })
        .collect();
    ChartSpec::Scatter { points }
}

fn histogram(rows: &[&HousingRecord]) -> ChartSpec {
    let prices: Vec<f64> = rows.iter().map(|r| r.sale_price).collect();
    ChartSpec::Histogram(Histogram::from_values(&prices, HISTOGRAM_BINS))
}

fn box_plot(rows: &[&HousingRecord]) -> ChartSpec {
    let mut by_neighborhood: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in rows {
        by_neighborhood
            .entry(r.neighborhood.as_str())
            .or_default()
            .push(r.lot_area);
    }
    let groups = by_neighborhood
        .into_iter()
        .filter_map(|(name, lots)| BoxStats::from_values(name, &lots))
        .collect();
    ChartSpec::BoxPlot { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::YearMode;
    use crate::data::model::record;
    use proptest::prelude::*;

    fn three_rows() -> HousingDataset {
        HousingDataset::from_records(vec![
            record("A", 2000, 100_000.0),
            record("A", 2005, 250_000.0),
            record("B", 2010, 900_000.0),
        ])
    }

    fn select(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scenario_cutoff_and_single_neighborhood() {
        let ds = three_rows();
        let filter = FilterState {
            chart_kind: ChartKind::Scatter,
            years: YearFilter::UpTo(2004),
            neighborhoods: select(&["A"]),
        };
        let view = resolve(&ds, &filter);
        let ChartSpec::Scatter { points } = &view.spec else {
            panic!("expected scatter, got {:?}", view.spec.kind());
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].neighborhood, "A");
        assert_eq!(points[0].sale_price, 100_000.0);
    }

    #[test]
    fn cutoff_is_inclusive_of_the_boundary_year() {
        let ds = three_rows();
        let view = resolve_selection(&ds, "scatter", YearFilter::UpTo(2005), select(&["A"])).unwrap();
        let ChartSpec::Scatter { points } = &view.spec else {
            panic!("expected scatter, got {:?}", view.spec.kind());
        };
        let prices: Vec<f64> = points.iter().map(|p| p.sale_price).collect();
        assert_eq!(prices, vec![100_000.0, 250_000.0]);
    }

    #[test]
    fn scenario_histogram_bins() {
        let ds = three_rows();
        let filter = FilterState {
            chart_kind: ChartKind::Histogram,
            ..FilterState::initial(&ds, YearMode::Range)
        };
        let view = resolve(&ds, &filter);
        let ChartSpec::Histogram(hist) = &view.spec else {
            panic!("expected histogram");
        };
        assert_eq!(hist.start, 100_000.0);
        assert!(hist.bin_index(250_000.0) < HISTOGRAM_BINS / 4);
        assert_eq!(hist.bin_index(900_000.0), HISTOGRAM_BINS - 1);
        assert_eq!(hist.counts[HISTOGRAM_BINS - 1], 1);
        assert_eq!(view.summary, summary_for(ChartKind::Histogram));
    }

    #[test]
    fn scenario_unknown_kind_is_rejected() {
        let ds = three_rows();
        let result = resolve_selection(&ds, "zzz", YearFilter::UpTo(2010), select(&["A"]));
        assert_eq!(result, Err(DashError::InvalidSelection("zzz".to_string())));
    }

    #[test]
    fn box_plot_groups_by_neighborhood() {
        let ds = three_rows();
        let view = resolve_selection(
            &ds,
            "boxplot",
            YearFilter::Between { lo: 2000, hi: 2010 },
            select(&["A", "B"]),
        )
        .unwrap();
        let ChartSpec::BoxPlot { groups } = &view.spec else {
            panic!("expected box plot");
        };
        let names: Vec<_> = groups.iter().map(|g| g.neighborhood.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(groups[0].count, 2);
        assert_eq!(view.spec.data_points(), 3);
    }

    #[test]
    fn empty_selection_is_an_empty_result() {
        let ds = three_rows();
        for kind in ChartKind::ALL {
            let view = resolve_selection(&ds, kind.as_str(), YearFilter::UpTo(2010), BTreeSet::new()).unwrap();
            assert_eq!(view.status(), ViewStatus::EmptyResult);
            assert_eq!(view.spec.kind(), kind);
            assert_eq!(view.spec.data_points(), 0);
        }
    }

    #[test]
    fn empty_dataset_resolves() {
        let ds = HousingDataset::default();
        let filter = FilterState::initial(&ds, YearMode::Cutoff);
        let view = resolve(&ds, &filter);
        assert_eq!(view.status(), ViewStatus::EmptyResult);
    }

    #[test]
    fn unknown_neighborhoods_are_ignored() {
        let ds = three_rows();
        let view = resolve_selection(&ds, "scatter", YearFilter::UpTo(2010), select(&["B", "Atlantis"])).unwrap();
        assert_eq!(view.matched_rows, 1);
        assert_eq!(view.status(), ViewStatus::Ready);
    }

    fn synthetic_dataset() -> impl Strategy<Value = HousingDataset> {
        let row = (0usize..4, 1950i32..2011, 50_000.0f64..800_000.0);
        prop::collection::vec(row, 0..60).prop_map(|rows| {
            let names = ["NAmes", "OldTown", "Gilbert", "Sawyer"];
            HousingDataset::from_records(
                rows.into_iter()
                    .map(|(n, year, price)| record(names[n], year, price))
                    .collect(),
            )
        })
    }

    fn any_kind() -> impl Strategy<Value = ChartKind> {
        prop::sample::select(ChartKind::ALL.to_vec())
    }

    fn any_neighborhoods() -> impl Strategy<Value = BTreeSet<String>> {
        prop::sample::subsequence(vec!["NAmes", "OldTown", "Gilbert", "Sawyer", "Nowhere"], 0..=5)
            .prop_map(|names| names.into_iter().map(String::from).collect())
    }

    proptest! {
        #[test]
        fn declared_kind_matches_input(
            ds in synthetic_dataset(),
            kind in any_kind(),
            hoods in any_neighborhoods(),
            cutoff in 1940i32..2020,
        ) {
            let filter = FilterState { chart_kind: kind, years: YearFilter::UpTo(cutoff), neighborhoods: hoods };
            prop_assert_eq!(resolve(&ds, &filter).spec.kind(), kind);
        }

        #[test]
        fn filtered_rows_respect_year_range(
            ds in synthetic_dataset(),
            hoods in any_neighborhoods(),
            a in 1950i32..2011,
            b in 1950i32..2011,
        ) {
            let (lo, hi) = (a.min(b), a.max(b));
            let filter = FilterState {
                chart_kind: ChartKind::Scatter,
                years: YearFilter::Between { lo, hi },
                neighborhoods: hoods.clone(),
            };
            let view = resolve(&ds, &filter);
            for idx in filtered_indices(&ds, &filter.normalized(&ds)) {
                let r = &ds.records()[idx];
                prop_assert!(lo <= r.year_built && r.year_built <= hi);
                prop_assert!(hoods.contains(&r.neighborhood));
            }
            prop_assert_eq!(view.spec.data_points(), view.matched_rows);
        }

        #[test]
        fn filtered_rows_respect_year_cutoff(
            ds in synthetic_dataset(),
            kind in any_kind(),
            hoods in any_neighborhoods(),
            cutoff in 1940i32..2020,
        ) {
            let filter = FilterState { chart_kind: kind, years: YearFilter::UpTo(cutoff), neighborhoods: hoods.clone() };
            let view = resolve(&ds, &filter);
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.year_built <= cutoff && hoods.contains(&r.neighborhood))
                .count();
            for idx in filtered_indices(&ds, &filter.normalized(&ds)) {
                let r = &ds.records()[idx];
                prop_assert!(r.year_built <= cutoff);
                prop_assert!(hoods.contains(&r.neighborhood));
            }
            prop_assert_eq!(view.matched_rows, expected);
            prop_assert_eq!(view.spec.data_points(), expected);
        }

        #[test]
        fn resolving_twice_is_identical(
            ds in synthetic_dataset(),
            kind in any_kind(),
            hoods in any_neighborhoods(),
            cutoff in 1940i32..2020,
        ) {
            let filter = FilterState { chart_kind: kind, years: YearFilter::UpTo(cutoff), neighborhoods: hoods };
            prop_assert_eq!(resolve(&ds, &filter), resolve(&ds, &filter));
        }

        #[test]
        fn empty_neighborhoods_never_fail(ds in synthetic_dataset(), kind in any_kind()) {
            let filter = FilterState { neighborhoods: BTreeSet::new(), chart_kind: kind, ..FilterState::initial(&ds, YearMode::Range) };
            let view = resolve(&ds, &filter);
            prop_assert_eq!(view.status(), ViewStatus::EmptyResult);
            prop_assert_eq!(view.spec.data_points(), 0);
        }
    }
}
