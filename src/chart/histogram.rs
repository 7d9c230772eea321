use serde::Serialize;

/// Number of bins used for the sale price distribution.
pub const HISTOGRAM_BINS: usize = 50;

/// Equal-width bins spanning the min/max of the binned values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` buckets between their minimum and maximum.
    ///
    /// The maximum lands in the last bin. When every value is equal the bins
    /// get unit width starting at that value. No values → no bins.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if bins == 0 || min > max {
            return Histogram {
                start: 0.0,
                bin_width: 0.0,
                counts: Vec::new(),
            };
        }

        let span = max - min;
        let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };

        let mut hist = Histogram {
            start: min,
            bin_width,
            counts: vec![0; bins],
        };
        for &v in values.iter().filter(|v| v.is_finite()) {
            let idx = hist.bin_index(v);
            hist.counts[idx] += 1;
        }
        hist
    }

    /// Bin that `value` falls into, clamped to the first/last bin.
    pub fn bin_index(&self, value: f64) -> usize {
        let last = self.counts.len().saturating_sub(1);
        if self.bin_width <= 0.0 {
            return 0;
        }
        let raw = ((value - self.start) / self.bin_width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }

    /// `(left edge, right edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(|(i, &count)| {
            let lo = self.start + i as f64 * self.bin_width;
            (lo, lo + self.bin_width, count)
        })
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
