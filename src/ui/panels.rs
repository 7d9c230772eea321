use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::{ChartKind, ChartSpec};
use crate::data::filter::YearFilter;
use crate::resolve::ViewStatus;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the widgets.
    let (Some(dataset), Some(filters)) = (state.dataset.clone(), state.filters.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Chart type ----
    ui.strong("Choose Graph Type");
    egui::ComboBox::from_id_salt("chart_kind")
        .selected_text(filters.chart_kind.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(filters.chart_kind == kind, kind.label())
                    .clicked()
                {
                    state.set_chart_kind(kind);
                }
            }
        });
    ui.separator();

    // ---- Year control ----
    if let Some((min_year, max_year)) = dataset.year_bounds() {
        match filters.years {
            YearFilter::UpTo(mut cutoff) => {
                ui.strong("Built up to");
                if ui
                    .add(egui::Slider::new(&mut cutoff, min_year..=max_year))
                    .changed()
                {
                    state.set_years(YearFilter::UpTo(cutoff));
                }
            }
            YearFilter::Between { mut lo, mut hi } => {
                ui.strong("Select Year Range");
                let from = ui.add(egui::Slider::new(&mut lo, min_year..=max_year).text("from"));
                let to = ui.add(egui::Slider::new(&mut hi, min_year..=max_year).text("to"));
                if from.changed() || to.changed() {
                    // Keep the handles from crossing.
                    if from.changed() {
                        hi = hi.max(lo);
                    } else {
                        lo = lo.min(hi);
                    }
                    state.set_years(YearFilter::Between { lo, hi });
                }
            }
        }
        ui.separator();
    }

    // ---- Neighborhood checklist ----
    let n_selected = filters.neighborhoods.len();
    let n_total = dataset.neighborhoods().len();
    ui.strong(format!("Neighborhoods  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in dataset.neighborhoods() {
                let mut checked = filters.neighborhoods.contains(name);
                let text = RichText::new(name).color(state.neighborhood_colors.color_for(name));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_neighborhood(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} homes loaded, {} shown",
                ds.len(),
                view.matched_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – summary of analysis
// ---------------------------------------------------------------------------

/// Render the caption for the current chart, plus per-neighborhood box
/// statistics when a box plot is shown.
pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };

    ui.heading("Summary of Analysis");
    ui.label(view.summary);
    if view.status() == ViewStatus::EmptyResult {
        ui.label(RichText::new("No homes match the current filters.").italics());
    }

    if let ChartSpec::BoxPlot { groups } = &view.spec {
        if groups.is_empty() {
            return;
        }
        ui.separator();
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .columns(Column::auto().at_least(70.0), 5)
            .header(18.0, |mut header| {
                for title in ["Neighborhood", "Homes", "Q1", "Median", "Q3", "Outliers"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for g in groups {
                    body.row(16.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(g.neighborhood.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(g.count.to_string());
                        });
                        for v in [g.q1, g.median, g.q3] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{v:.0}"));
                            });
                        }
                        row.col(|ui: &mut Ui| {
                            ui.label(g.outliers.len().to_string());
                        });
                    });
                }
            });
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open housing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
