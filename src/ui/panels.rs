use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::pareto::TieBreak;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – column selection and frontier table
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Axes");
    ui.separator();

    if state.table.is_none() {
        ui.label("No table loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the widgets.
    let columns = state.column_names().to_vec();

    if let Some(col) = column_combo(ui, "x_column", "X (minimise)", &state.columns.x, &columns) {
        state.set_x_column(col);
    }
    if let Some(col) = column_combo(ui, "y_column", "Y (maximise)", &state.columns.y, &columns) {
        state.set_y_column(col);
    }
    if let Some(col) = column_combo(ui, "label_column", "Label", &state.columns.label, &columns) {
        state.set_label_column(col);
    }

    ui.strong("Equal-point tie-break");
    ui.horizontal(|ui: &mut Ui| {
        for choice in [TieBreak::Last, TieBreak::First] {
            if ui
                .selectable_label(state.tie_break == choice, format!("keep {choice}"))
                .clicked()
                && state.tie_break != choice
            {
                state.set_tie_break(choice);
            }
        }
    });
    ui.separator();

    let Some(analysis) = &state.analysis else {
        return;
    };

    ui.strong(format!("Frontier ({} points)", analysis.frontier.len()));
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            Grid::new("frontier_table")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong(&state.columns.x);
                    ui.strong(&state.columns.y);
                    ui.strong(&state.columns.label);
                    ui.end_row();
                    for f in &analysis.frontier {
                        ui.label(format!("{:.4}", f.x));
                        ui.label(format!("{:.4}", f.y));
                        ui.label(&f.label);
                        ui.end_row();
                    }
                });
        });
}

/// Labelled combo box over the table's columns.  Returns the newly picked
/// column, if any.
fn column_combo(
    ui: &mut Ui,
    id: &str,
    title: &str,
    current: &str,
    columns: &[String],
) -> Option<String> {
    let mut picked = None;
    ui.strong(title);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(current == col, col).clicked() && current != col {
                    picked = Some(col.clone());
                }
            }
        });
    ui.add_space(4.0);
    picked
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
            if ui
                .add_enabled(state.analysis.is_some(), egui::Button::new("Export PNG…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{} trials, {} on the frontier",
                analysis.points.len(),
                analysis.frontier.len()
            ));
            ui.separator();
        }

        if ui
            .selectable_label(state.chart.show_labels, "Labels")
            .clicked()
        {
            state.chart.show_labels = !state.chart.show_labels;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trials table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export Pareto plot")
        .add_filter("PNG image", &["png"])
        .set_file_name("pareto.png")
        .save_file();

    if let Some(path) = file {
        state.export_png(&path);
    }
}
