use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::YearMode;

/// Interactive dashboard for the Ames housing dataset.
///
/// Logging verbosity follows `RUST_LOG` (e.g. `RUST_LOG=ames_dash=debug`).
#[derive(Debug, Clone, Parser)]
#[command(name = "ames-dash", version, about)]
pub struct Config {
    /// Dataset to open on startup (.csv, .json, .parquet).
    #[arg(long, short = 'd', value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Chart shown first: scatter, histogram or boxplot.
    #[arg(long, default_value = "scatter")]
    pub chart: String,

    /// Year control shown in the side panel.
    #[arg(long, value_enum, default_value_t = YearMode::Range)]
    pub year_mode: YearMode,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}
