use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, Points,
};

use crate::chart::{BoxStats, ChartKind, ChartSpec, Histogram, ScatterPoint};
use crate::color::ColorMap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the resolved chart in the central panel.
pub fn chart(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    };

    ui.heading(view.spec.kind().title());

    match &view.spec {
        ChartSpec::Scatter { points } => scatter(ui, points, &state.quality_colors),
        ChartSpec::Histogram(hist) => histogram(ui, hist),
        ChartSpec::BoxPlot { groups } => box_plot(ui, groups, &state.neighborhood_colors),
    }
}

fn base_plot<'a>(kind: ChartKind) -> Plot<'a> {
    Plot::new(("chart", kind.as_str()))
        .legend(Legend::default())
        .x_axis_label(kind.x_label())
        .y_axis_label(kind.y_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

fn scatter(ui: &mut Ui, points: &[ScatterPoint], colors: &ColorMap<u8>) {
    let mut by_quality: BTreeMap<u8, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        by_quality
            .entry(p.quality)
            .or_default()
            .push([p.living_area, p.sale_price]);
    }

    base_plot(ChartKind::Scatter)
        .label_formatter(|name, value| {
            let base = format!("area {:.0}\nprice {:.0}", value.x, value.y);
            if name.is_empty() {
                return base;
            }
            match tooltip_for(points, value) {
                Some(neighborhood) => format!("{name}\n{neighborhood}\n{base}"),
                None => format!("{name}\n{base}"),
            }
        })
        .show(ui, |plot_ui| {
            for (quality, series) in by_quality {
                plot_ui.points(
                    Points::new(series)
                        .name(format!("Quality {quality}"))
                        .color(colors.color_for(&quality))
                        .radius(2.5),
                );
            }
        });
}

/// Neighborhood of the marker exactly under the hovered value.
fn tooltip_for<'a>(points: &'a [ScatterPoint], value: &PlotPoint) -> Option<&'a str> {
    points
        .iter()
        .find(|p| p.living_area == value.x && p.sale_price == value.y)
        .map(|p| p.neighborhood.as_str())
}

fn histogram(ui: &mut Ui, hist: &Histogram) {
    let bars: Vec<Bar> = hist
        .bins()
        .map(|(lo, hi, count)| Bar::new((lo + hi) / 2.0, count as f64).width(hist.bin_width))
        .collect();

    base_plot(ChartKind::Histogram).show(ui, |plot_ui| {
        plot_ui.bar_chart(
            BarChart::new(bars)
                .name("Sale Price")
                .color(Color32::from_rgb(99, 110, 250)),
        );
    });
}

fn box_plot(ui: &mut Ui, groups: &[BoxStats], colors: &ColorMap<String>) {
    let names: Vec<String> = groups.iter().map(|g| g.neighborhood.clone()).collect();

    base_plot(ChartKind::BoxPlot)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, g) in groups.iter().enumerate() {
                let color = colors.color_for(&g.neighborhood);
                let x = i as f64;
                let spread = BoxSpread::new(g.lower_whisker, g.q1, g.median, g.q3, g.upper_whisker);
                let elem = BoxElem::new(x, spread)
                    .name(&g.neighborhood)
                    .box_width(0.6)
                    .whisker_width(0.3)
                    .fill(color.gamma_multiply(0.4))
                    .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&g.neighborhood).color(color));

                if !g.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> = g.outliers.iter().map(|&v| [x, v]).collect();
                    plot_ui.points(Points::new(outliers).color(color).radius(2.0));
                }
            }
        });
}
