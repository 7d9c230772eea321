use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generators
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Generates `n` colours ramping from dark purple to bright yellow, for
/// ordinal values where neighbouring levels should look related.
pub fn sequential_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![hsl_to_color32(Hsl::new(160.0, 0.6, 0.45))],
        _ => (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                let hue = 270.0 - t * 215.0;
                let lightness = 0.30 + t * 0.35;
                hsl_to_color32(Hsl::new(hue, 0.8, lightness))
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of an encoding channel to colours.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone> ColorMap<K> {
    /// Distinct hues, for nominal values such as neighborhoods.
    pub fn categorical<'a>(keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: 'a,
    {
        Self::with_palette(keys, generate_palette)
    }

    /// A ramp, for ordinal values such as quality ratings.
    pub fn sequential<'a>(keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: 'a,
    {
        Self::with_palette(keys, sequential_palette)
    }

    fn with_palette<'a>(
        keys: impl IntoIterator<Item = &'a K>,
        palette: fn(usize) -> Vec<Color32>,
    ) -> Self
    where
        K: 'a,
    {
        let mut keys: Vec<K> = keys.into_iter().cloned().collect();
        keys.sort();
        keys.dedup();
        let colors = palette(keys.len());
        let mapping = keys.into_iter().zip(colors).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, key: &K) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}
