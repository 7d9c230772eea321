use super::model::{HousingDataset, HousingRecord};

// ---------------------------------------------------------------------------
// RawRecord – one source row before cleaning
// ---------------------------------------------------------------------------

/// A source row as parsed from disk. Any column may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub neighborhood: Option<String>,
    pub year_built: Option<i32>,
    pub living_area: Option<f64>,
    pub sale_price: Option<f64>,
    pub lot_area: Option<f64>,
    pub overall_quality: Option<u8>,
    pub lot_frontage: Option<f64>,
    pub masonry_veneer_area: Option<f64>,
    pub garage_year_built: Option<i32>,
}

/// Outcome of [`clean`]: the new dataset plus bookkeeping for the status line.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub dataset: HousingDataset,
    /// Rows discarded because a filter-relevant column was missing.
    pub dropped_rows: usize,
    /// Number of lot frontage cells filled with the median.
    pub imputed_frontage: usize,
}

/// Turn raw rows into an immutable [`HousingDataset`].
///
/// * Lot frontage → median of the present values (0.0 when none are present).
/// * Masonry veneer area → 0.0.
/// * Garage year built → the row's own build year.
/// * Rows missing neighborhood, build year, living area, sale price, lot area
///   or overall quality are dropped.
pub fn clean(raw: Vec<RawRecord>) -> CleanReport {
    let frontage_median = median(
        raw.iter()
            .filter_map(|r| r.lot_frontage)
            .filter(|v| v.is_finite())
            .collect(),
    )
    .unwrap_or(0.0);

    let mut dropped_rows = 0;
    let mut imputed_frontage = 0;
    let mut records = Vec::with_capacity(raw.len());

    for row in raw {
        let Some(record) = complete(&row, frontage_median) else {
            dropped_rows += 1;
            continue;
        };
        if !row.lot_frontage.is_some_and(f64::is_finite) {
            imputed_frontage += 1;
        }
        records.push(record);
    }

    if dropped_rows > 0 {
        log::warn!("Dropped {dropped_rows} rows with missing filter columns");
    }

    CleanReport {
        dataset: HousingDataset::from_records(records),
        dropped_rows,
        imputed_frontage,
    }
}

fn complete(row: &RawRecord, frontage_median: f64) -> Option<HousingRecord> {
    let neighborhood = row.neighborhood.as_ref().filter(|n| !n.is_empty())?.clone();
    let year_built = row.year_built?;
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
    Some(HousingRecord {
        neighborhood,
        year_built,
        living_area: finite(row.living_area)?,
        sale_price: finite(row.sale_price)?,
        lot_area: finite(row.lot_area)?,
        overall_quality: row.overall_quality?,
        lot_frontage: finite(row.lot_frontage).unwrap_or(frontage_median),
        masonry_veneer_area: finite(row.masonry_veneer_area).unwrap_or(0.0),
        garage_year_built: row.garage_year_built.unwrap_or(year_built),
    })
}

/// Median with the mean of the two middle values for even counts.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(neighborhood: &str, year: i32, frontage: Option<f64>) -> RawRecord {
        RawRecord {
            neighborhood: Some(neighborhood.to_string()),
            year_built: Some(year),
            living_area: Some(1200.0),
            sale_price: Some(140_000.0),
            lot_area: Some(8_000.0),
            overall_quality: Some(6),
            lot_frontage: frontage,
            masonry_veneer_area: None,
            garage_year_built: None,
        }
    }

    #[test]
    fn imputes_missing_columns() {
        let report = clean(vec![
            raw("NAmes", 1960, Some(60.0)),
            raw("NAmes", 1970, Some(80.0)),
            raw("Edwards", 1980, None),
        ]);

        let records = report.dataset.records();
        assert_eq!(records.len(), 3);
        assert_eq!(report.imputed_frontage, 1);
        assert_eq!(records[2].lot_frontage, 70.0);
        assert!(records.iter().all(|r| r.masonry_veneer_area == 0.0));
        assert!(records.iter().all(|r| r.garage_year_built == r.year_built));
    }

    #[test]
    fn keeps_present_values() {
        let mut row = raw("Gilbert", 1999, Some(65.0));
        row.masonry_veneer_area = Some(120.0);
        row.garage_year_built = Some(2001);

        let report = clean(vec![row]);
        let r = &report.dataset.records()[0];
        assert_eq!(r.masonry_veneer_area, 120.0);
        assert_eq!(r.garage_year_built, 2001);
        assert_eq!(r.lot_frontage, 65.0);
    }

    #[test]
    fn drops_rows_missing_filter_columns() {
        let mut no_price = raw("OldTown", 1920, Some(50.0));
        no_price.sale_price = None;
        let mut blank_name = raw("", 1930, Some(50.0));
        blank_name.neighborhood = Some(String::new());

        let report = clean(vec![no_price, blank_name, raw("OldTown", 1915, None)]);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.dataset.len(), 1);
        // Median is taken over all present frontage cells, including dropped rows.
        assert_eq!(report.dataset.records()[0].lot_frontage, 50.0);
    }

    #[test]
    fn drops_rows_with_non_finite_filter_values() {
        let mut nan_price = raw("NAmes", 1960, Some(60.0));
        nan_price.sale_price = Some(f64::NAN);
        let mut inf_area = raw("NAmes", 1970, Some(70.0));
        inf_area.living_area = Some(f64::INFINITY);
        let mut nan_frontage = raw("NAmes", 1980, Some(f64::NAN));
        nan_frontage.masonry_veneer_area = Some(f64::NEG_INFINITY);

        let report = clean(vec![nan_price, inf_area, nan_frontage]);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.dataset.year_bounds(), Some((1980, 1980)));

        let kept = &report.dataset.records()[0];
        assert_eq!(kept.lot_frontage, 65.0);
        assert_eq!(kept.masonry_veneer_area, 0.0);
        assert_eq!(report.imputed_frontage, 1);
    }

    #[test]
    fn frontage_defaults_to_zero_without_any_values() {
        let report = clean(vec![raw("Sawyer", 1955, None)]);
        assert_eq!(report.dataset.records()[0].lot_frontage, 0.0);
    }

    #[test]
    fn median_handles_odd_and_even_counts() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(Vec::new()), None);
    }
}
