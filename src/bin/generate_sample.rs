use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (name, typical first build year, typical lot area, price multiplier)
const NEIGHBORHOODS: [(&str, i64, f64, f64); 8] = [
    ("NAmes", 1955, 9_500.0, 1.00),
    ("CollgCr", 1995, 9_800.0, 1.20),
    ("OldTown", 1915, 7_200.0, 0.80),
    ("Edwards", 1950, 10_500.0, 0.85),
    ("Gilbert", 1998, 11_000.0, 1.15),
    ("NridgHt", 2004, 11_500.0, 1.75),
    ("Sawyer", 1962, 10_000.0, 0.95),
    ("ClearCr", 1970, 19_000.0, 1.30),
];

struct Row {
    pid: i64,
    neighborhood: &'static str,
    year_built: i64,
    living_area: f64,
    sale_price: f64,
    lot_area: f64,
    overall_quality: i64,
    lot_frontage: Option<f64>,
    masonry_veneer_area: Option<f64>,
    garage_year_built: Option<i64>,
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let (neighborhood, era, lot_base, multiplier) = NEIGHBORHOODS[i % NEIGHBORHOODS.len()];
            let year_built = (era + rng.gauss(0.0, 12.0) as i64).clamp(1872, 2010);
            let overall_quality = rng.range(1, 10);
            let living_area = (900.0 + overall_quality as f64 * 140.0 + rng.gauss(0.0, 300.0)).max(400.0);
            let age_discount = (2010 - year_built) as f64 * 250.0;
            let sale_price = ((living_area * 70.0 + overall_quality as f64 * 12_000.0 - age_discount)
                * multiplier
                + rng.gauss(0.0, 15_000.0))
            .max(35_000.0);

            // Occasional very large lots show up as box plot outliers.
            let lot_area = if rng.next_f64() < 0.03 {
                lot_base * rng.range(4, 12) as f64
            } else {
                (lot_base + rng.gauss(0.0, lot_base * 0.2)).max(1_300.0)
            };

            Row {
                pid: 526_300_000 + i as i64,
                neighborhood,
                year_built,
                living_area: living_area.round(),
                sale_price: sale_price.round(),
                lot_area: lot_area.round(),
                overall_quality,
                lot_frontage: (i % 6 != 0).then(|| (lot_area.sqrt() * 0.7).round()),
                masonry_veneer_area: (i % 11 != 0).then(|| rng.range(0, 400) as f64),
                garage_year_built: (i % 13 != 0).then(|| year_built + rng.range(0, 5)),
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "PID",
        "Lot Frontage",
        "Lot Area",
        "Neighborhood",
        "Overall Qual",
        "Year Built",
        "Mas Vnr Area",
        "Gr Liv Area",
        "Garage Yr Blt",
        "SalePrice",
    ])?;
    let opt = |v: Option<String>| v.unwrap_or_else(|| "NA".to_string());
    for r in rows {
        writer.write_record([
            r.pid.to_string(),
            opt(r.lot_frontage.map(|v| v.to_string())),
            r.lot_area.to_string(),
            r.neighborhood.to_string(),
            r.overall_quality.to_string(),
            r.year_built.to_string(),
            opt(r.masonry_veneer_area.map(|v| v.to_string())),
            r.living_area.to_string(),
            r.garage_year_built.map(|v| v.to_string()).unwrap_or_default(),
            r.sale_price.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("PID", DataType::Int64, false),
        Field::new("Lot Frontage", DataType::Float64, true),
        Field::new("Lot Area", DataType::Float64, false),
        Field::new("Neighborhood", DataType::Utf8, false),
        Field::new("Overall Qual", DataType::Int64, false),
        Field::new("Year Built", DataType::Int64, false),
        Field::new("Mas Vnr Area", DataType::Float64, true),
        Field::new("Gr Liv Area", DataType::Float64, false),
        Field::new("Garage Yr Blt", DataType::Int64, true),
        Field::new("SalePrice", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.pid))),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.lot_frontage).collect::<Vec<_>>())),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.lot_area))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.neighborhood))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.overall_quality))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year_built))),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.masonry_veneer_area).collect::<Vec<_>>())),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.living_area))),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.garage_year_built).collect::<Vec<_>>())),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sale_price))),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 1_200);

    write_parquet("sample_housing.parquet", &rows)?;
    write_csv("sample_housing.csv", &rows)?;

    println!(
        "Wrote {} sales across {} neighborhoods to sample_housing.parquet and sample_housing.csv",
        rows.len(),
        NEIGHBORHOODS.len()
    );
    Ok(())
}
