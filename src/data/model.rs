use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// HousingRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A single cleaned sale observation.
///
/// Every field is populated: missing values were either imputed or the row
/// was dropped by [`super::clean::clean`].
#[derive(Debug, Clone, PartialEq)]
pub struct HousingRecord {
    pub neighborhood: String,
    pub year_built: i32,
    /// Above grade living area, square feet.
    pub living_area: f64,
    pub sale_price: f64,
    /// Lot size, square feet.
    pub lot_area: f64,
    /// Ordinal 1–10.
    pub overall_quality: u8,
    pub lot_frontage: f64,
    pub masonry_veneer_area: f64,
    pub garage_year_built: i32,
}

// ---------------------------------------------------------------------------
// HousingDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable cleaned dataset with pre-computed column indices.
///
/// Built once by the loader and then shared read-only (behind an `Arc`) with
/// the UI state and the resolver.
#[derive(Debug, Clone, Default)]
pub struct HousingDataset {
    records: Vec<HousingRecord>,
    neighborhoods: BTreeSet<String>,
    year_bounds: Option<(i32, i32)>,
}

impl HousingDataset {
    /// Build column indices from cleaned records.
    pub fn from_records(records: Vec<HousingRecord>) -> Self {
        let neighborhoods: BTreeSet<String> =
            records.iter().map(|r| r.neighborhood.clone()).collect();

        let year_bounds = records.iter().fold(None, |acc, r| match acc {
            None => Some((r.year_built, r.year_built)),
            Some((lo, hi)) => Some((lo.min(r.year_built), hi.max(r.year_built))),
        });

        HousingDataset {
            records,
            neighborhoods,
            year_bounds,
        }
    }

    pub fn records(&self) -> &[HousingRecord] {
        &self.records
    }

    /// Sorted set of distinct neighborhood names.
    pub fn neighborhoods(&self) -> &BTreeSet<String> {
        &self.neighborhoods
    }

    /// Observed `(min, max)` build year, `None` when the dataset is empty.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(neighborhood: &str, year_built: i32, sale_price: f64) -> HousingRecord {
    HousingRecord {
        neighborhood: neighborhood.to_string(),
        year_built,
        living_area: 1500.0,
        sale_price,
        lot_area: 9000.0,
        overall_quality: 5,
        lot_frontage: 70.0,
        masonry_veneer_area: 0.0,
        garage_year_built: year_built,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_neighborhoods_and_year_bounds() {
        let ds = HousingDataset::from_records(vec![
            record("NAmes", 1960, 150_000.0),
            record("CollgCr", 2003, 210_000.0),
            record("NAmes", 1925, 98_000.0),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.neighborhoods().iter().collect::<Vec<_>>(),
            vec!["CollgCr", "NAmes"]
        );
        assert_eq!(ds.year_bounds(), Some((1925, 2003)));
    }

    #[test]
    fn empty_dataset_has_no_year_bounds() {
        let ds = HousingDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
        assert!(ds.neighborhoods().is_empty());
    }
}
