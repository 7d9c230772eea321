/// Data layer: core types, loading, cleaning, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  impute / drop incomplete rows → HousingDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year + neighborhood predicates → filtered indices
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
