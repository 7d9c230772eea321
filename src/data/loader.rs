use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::{CleanReport, RawRecord, clean};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a housing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – AmesHousing layout (`Gr Liv Area`, `SalePrice`, …)
/// * `.json`    – `[{ "Neighborhood": "NAmes", "Year Built": 1960, ... }, ...]`
/// * `.parquet` – flat columns using the same names
///
/// Column names match regardless of spacing, case, and underscores, so both
/// `Gr Liv Area` and `GrLivArea` are accepted.
pub fn load_file(path: &Path) -> Result<CleanReport> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(clean(raw))
}

// ---------------------------------------------------------------------------
// Column naming
// ---------------------------------------------------------------------------

/// Source columns the dashboard reads. Everything else (including the `PID`
/// and `Order` identifiers) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Neighborhood,
    YearBuilt,
    LivingArea,
    SalePrice,
    LotArea,
    OverallQuality,
    LotFrontage,
    MasonryVeneerArea,
    GarageYearBuilt,
}

impl Column {
    const ALL: [Column; 9] = [
        Column::Neighborhood,
        Column::YearBuilt,
        Column::LivingArea,
        Column::SalePrice,
        Column::LotArea,
        Column::OverallQuality,
        Column::LotFrontage,
        Column::MasonryVeneerArea,
        Column::GarageYearBuilt,
    ];

    /// Display name as written in AmesHousing.csv.
    fn header(self) -> &'static str {
        match self {
            Column::Neighborhood => "Neighborhood",
            Column::YearBuilt => "Year Built",
            Column::LivingArea => "Gr Liv Area",
            Column::SalePrice => "SalePrice",
            Column::LotArea => "Lot Area",
            Column::OverallQuality => "Overall Qual",
            Column::LotFrontage => "Lot Frontage",
            Column::MasonryVeneerArea => "Mas Vnr Area",
            Column::GarageYearBuilt => "Garage Yr Blt",
        }
    }

    /// Imputed columns may be absent from the source entirely.
    fn required(self) -> bool {
        !matches!(
            self,
            Column::LotFrontage | Column::MasonryVeneerArea | Column::GarageYearBuilt
        )
    }

    fn from_header(name: &str) -> Option<Column> {
        let key = normalize(name);
        Column::ALL
            .iter()
            .copied()
            .find(|c| normalize(c.header()) == key)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Positions of the known columns inside a source schema.
struct ColumnIndex {
    positions: Vec<(Column, usize)>,
}

impl ColumnIndex {
    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut positions: Vec<(Column, usize)> = Vec::new();
        for (idx, name) in names.into_iter().enumerate() {
            if let Some(col) = Column::from_header(name) {
                if !positions.iter().any(|(c, _)| *c == col) {
                    positions.push((col, idx));
                }
            }
        }
        for col in Column::ALL.iter().filter(|c| c.required()) {
            if !positions.iter().any(|(c, _)| c == col) {
                bail!("missing '{}' column", col.header());
            }
        }
        Ok(ColumnIndex { positions })
    }

    fn position(&self, col: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, idx)| *idx)
    }
}

// ---------------------------------------------------------------------------
// Cell conversion shared by every format
// ---------------------------------------------------------------------------

/// Markers pandas reads as NA by default.
const NA_VALUES: [&str; 16] = [
    "NA", "N/A", "n/a", "#N/A", "#N/A N/A", "#NA", "NaN", "-NaN", "nan", "-nan", "NULL", "null",
    "None", "<NA>", "-1.#IND", "1.#QNAN",
];

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Empty strings and pandas' default NA spellings count as missing.
    fn from_text(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() || NA_VALUES.contains(&s) {
            Cell::Missing
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn number(&self) -> Result<Option<f64>> {
        match self {
            Cell::Missing => Ok(None),
            Cell::Number(n) => Ok(Some(*n).filter(|v| v.is_finite())),
            // `f64::from_str` accepts "inf" and "nan", which are missing here.
            Cell::Text(s) => s
                .parse::<f64>()
                .map(|v| Some(v).filter(|v| v.is_finite()))
                .with_context(|| format!("'{s}' is not a number")),
        }
    }

    fn text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// Build one [`RawRecord`] from a cell accessor.
fn assemble(row: usize, cell: impl Fn(Column) -> Cell) -> Result<RawRecord> {
    let number = |col: Column| {
        cell(col)
            .number()
            .with_context(|| format!("Row {row}, column '{}'", col.header()))
    };
    let year = |col: Column| -> Result<Option<i32>> {
        Ok(number(col)?.map(|v| v.round() as i32))
    };

    let overall_quality = match number(Column::OverallQuality)? {
        Some(q) if (0.0..=u8::MAX as f64).contains(&q) => Some(q.round() as u8),
        Some(q) => bail!("Row {row}: overall quality {q} out of range"),
        None => None,
    };

    Ok(RawRecord {
        neighborhood: cell(Column::Neighborhood).text(),
        year_built: year(Column::YearBuilt)?,
        living_area: number(Column::LivingArea)?,
        sale_price: number(Column::SalePrice)?,
        lot_area: number(Column::LotArea)?,
        overall_quality,
        lot_frontage: number(Column::LotFrontage)?,
        masonry_veneer_area: number(Column::MasonryVeneerArea)?,
        garage_year_built: year(Column::GarageYearBuilt)?,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one sale per row.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let index = ColumnIndex::from_names(headers.iter()).context("CSV header")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let raw = assemble(row_no, |col| match index.position(col) {
            Some(idx) => Cell::from_text(record.get(idx).unwrap_or("")),
            None => Cell::Missing,
        })?;
        rows.push(raw);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Neighborhood": "NAmes", "Year Built": 1960, "SalePrice": 215000, ... },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let index = ColumnIndex::from_names(obj.keys().map(String::as_str))
            .with_context(|| format!("Row {i}"))?;
        let values: Vec<&JsonValue> = obj.values().collect();

        let raw = assemble(i, |col| {
            index
                .position(col)
                .map(|idx| json_cell(values[idx]))
                .unwrap_or(Cell::Missing)
        })?;
        rows.push(raw);
    }

    Ok(rows)
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
        JsonValue::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Numeric columns may be any of Int16/Int32/Int64/Float32/Float64, text
/// columns Utf8 or LargeUtf8. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let index = ColumnIndex::from_names(schema.fields().iter().map(|f| f.name().as_str()))
            .context("parquet schema")?;

        for (col, idx) in &index.positions {
            let dt = schema.field(*idx).data_type();
            if !supported_type(dt) {
                bail!("Column '{}' has unsupported type {dt:?}", col.header());
            }
        }

        let offset = rows.len();
        for row in 0..batch.num_rows() {
            let raw = assemble(offset + row, |col| {
                index
                    .position(col)
                    .map(|idx| arrow_cell(batch.column(idx), row))
                    .unwrap_or(Cell::Missing)
            })?;
            rows.push(raw);
        }
    }

    Ok(rows)
}

fn supported_type(dt: &DataType) -> bool {
    matches!(
        dt,
        DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
            | DataType::Utf8
            | DataType::LargeUtf8
    )
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Cell::Number(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Cell::Number(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Cell::Number(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Cell::Number(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int16Array>() {
        Cell::Number(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<StringArray>() {
        Cell::from_text(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<LargeStringArray>() {
        Cell::from_text(arr.value(row))
    } else {
        Cell::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMES_CSV: &str = "\
Order,PID,Lot Frontage,Lot Area,Neighborhood,Overall Qual,Year Built,Mas Vnr Area,Gr Liv Area,Garage Yr Blt,SalePrice
1,526301100,141,31770,NAmes,6,1960,112,1656,1960,215000
2,526350040,NA,11622,NAmes,5,1961,0,896,,105000
3,526351010,81,14267,Gilbert,6,1958,,1329,1958.0,172000
";

    #[test]
    fn reads_ames_csv_layout() {
        let rows = read_csv(AMES_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].neighborhood.as_deref(), Some("NAmes"));
        assert_eq!(rows[0].year_built, Some(1960));
        assert_eq!(rows[0].living_area, Some(1656.0));
        assert_eq!(rows[0].sale_price, Some(215_000.0));
        assert_eq!(rows[0].overall_quality, Some(6));

        assert_eq!(rows[1].lot_frontage, None);
        assert_eq!(rows[1].garage_year_built, None);
        assert_eq!(rows[2].masonry_veneer_area, None);
        assert_eq!(rows[2].garage_year_built, Some(1958));
    }

    #[test]
    fn accepts_compact_column_names() {
        let csv = "Id,Neighborhood,YearBuilt,GrLivArea,SalePrice,LotArea,OverallQual,LotFrontage\n\
                   1,CollgCr,2003,1710,208500,8450,7,65\n";
        let rows = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].year_built, Some(2003));
        assert_eq!(rows[0].lot_frontage, Some(65.0));
        // Imputed columns may be absent from the header.
        assert_eq!(rows[0].masonry_veneer_area, None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "Neighborhood,Year Built,Gr Liv Area,Lot Area,Overall Qual\nNAmes,1960,1000,9000,5\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("SalePrice"));
    }

    #[test]
    fn bad_number_reports_row_and_column() {
        let csv = "Neighborhood,Year Built,Gr Liv Area,SalePrice,Lot Area,Overall Qual\n\
                   NAmes,1960,lots,100000,9000,5\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 0"));
        assert!(msg.contains("Gr Liv Area"));
    }

    #[test]
    fn parses_records_json() {
        let text = r#"[
            {"Neighborhood": "OldTown", "Year Built": 1920, "Gr Liv Area": 1100.5,
             "SalePrice": 99000, "Lot Area": 6000, "Overall Qual": 4,
             "Lot Frontage": null, "Mas Vnr Area": "NA"}
        ]"#;
        let rows = parse_json(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].neighborhood.as_deref(), Some("OldTown"));
        assert_eq!(rows[0].living_area, Some(1100.5));
        assert_eq!(rows[0].lot_frontage, None);
        assert_eq!(rows[0].masonry_veneer_area, None);
    }

    #[test]
    fn na_spellings_and_non_finite_numbers_are_missing() {
        let csv = "Neighborhood,Year Built,Gr Liv Area,SalePrice,Lot Area,Overall Qual,Lot Frontage\n\
                   NAmes,1960,1000,nan,9000,5,#N/A\n\
                   NAmes,NaN,1000,100000,9000,5,null\n\
                   NAmes,1970,1000,inf,9000,5,N/A\n\
                   NAmes,1980,-Infinity,120000,9000,5,60\n\
                   null,1990,1000,130000,9000,5,60\n";
        let rows = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].sale_price, None);
        assert_eq!(rows[0].lot_frontage, None);
        assert_eq!(rows[1].year_built, None);
        assert_eq!(rows[2].sale_price, None);
        assert_eq!(rows[3].living_area, None);
        assert_eq!(rows[4].neighborhood, None);

        let report = clean(rows);
        assert_eq!(report.dropped_rows, 5);
        assert!(report.dataset.is_empty());
        assert_eq!(report.dataset.year_bounds(), None);
    }

    #[test]
    fn non_finite_json_numbers_are_missing() {
        assert_eq!(Cell::Number(f64::INFINITY).number().unwrap(), None);
        assert_eq!(Cell::Number(f64::NAN).number().unwrap(), None);
        assert_eq!(Cell::Number(3.5).number().unwrap(), Some(3.5));
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(parse_json(r#"{"Neighborhood": "NAmes"}"#).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("houses.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
