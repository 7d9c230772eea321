//! Chart specifications: declarative descriptions of what to draw, built
//! from a filtered view of the dataset and independent of the plotting
//! backend.

pub mod boxplot;
pub mod histogram;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DashError;

pub use boxplot::BoxStats;
pub use histogram::{HISTOGRAM_BINS, Histogram};

// ---------------------------------------------------------------------------
// ChartKind – the chart-type dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Histogram,
    BoxPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Scatter, ChartKind::Histogram, ChartKind::BoxPlot];

    /// The value carried by the dropdown.
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
            ChartKind::BoxPlot => "boxplot",
        }
    }

    /// Human-readable dropdown entry.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter: Living Area vs Sale Price",
            ChartKind::Histogram => "Histogram: Sale Price Distribution",
            ChartKind::BoxPlot => "Box Plot: Lot Area by Neighborhood",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Living Area vs Sale Price",
            ChartKind::Histogram => "Distribution of Sale Prices",
            ChartKind::BoxPlot => "Lot Area by Neighborhood",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Above Grade Living Area (sq ft)",
            ChartKind::Histogram => "Sale Price",
            ChartKind::BoxPlot => "Neighborhood",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Sale Price",
            ChartKind::Histogram => "Count",
            ChartKind::BoxPlot => "Lot Area (sq ft)",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| DashError::InvalidSelection(s.to_string()))
    }
}

/// Fixed caption shown under each chart kind.
///
/// The caption does not depend on the filtered rows.
pub fn summary_for(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Scatter => {
            "Sale price rises with above grade living area, and homes with a higher \
             overall quality rating sit toward the upper right of the plot."
        }
        ChartKind::Histogram => {
            "Sale prices are right-skewed: most homes sell in the lower to middle \
             price range, with a long tail of expensive properties."
        }
        ChartKind::BoxPlot => {
            "Lot sizes differ considerably between neighborhoods, and several \
             neighborhoods contain very large lots that show up as outliers."
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSpec – what the plotting backend draws
// ---------------------------------------------------------------------------

/// One scatter marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// x: above grade living area.
    pub living_area: f64,
    /// y: sale price.
    pub sale_price: f64,
    /// Colour encoding.
    pub quality: u8,
    /// Tooltip.
    pub neighborhood: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Scatter { points: Vec<ScatterPoint> },
    Histogram(Histogram),
    BoxPlot { groups: Vec<BoxStats> },
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Scatter { .. } => ChartKind::Scatter,
            ChartSpec::Histogram(_) => ChartKind::Histogram,
            ChartSpec::BoxPlot { .. } => ChartKind::BoxPlot,
        }
    }

    /// Number of underlying rows represented by the chart.
    pub fn data_points(&self) -> usize {
        match self {
            ChartSpec::Scatter { points } => points.len(),
            ChartSpec::Histogram(hist) => hist.total(),
            ChartSpec::BoxPlot { groups } => groups.iter().map(|g| g.count).sum(),
        }
    }
}
