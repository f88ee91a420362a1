use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color;
use crate::config::prettify_column;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pareto plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter + frontier plot in the central panel.
pub fn pareto_plot(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.table.is_some() {
                "No valid data points for the selected columns"
            } else {
                "Open a trials table to plot its frontier  (File → Open…)"
            };
            ui.heading(hint);
        });
        return;
    };

    let accent = color::FRONTIER.to_color32();

    Plot::new("pareto_plot")
        .legend(Legend::default())
        .x_axis_label(prettify_column(&state.columns.x))
        .y_axis_label(prettify_column(&state.columns.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One series per label value so the legend doubles as a colour key.
            for (label, rgb) in state.color_map.legend_entries() {
                let points: PlotPoints = analysis
                    .points
                    .iter()
                    .filter(|p| p.label == label)
                    .map(|p| [p.x, p.y])
                    .collect();
                let name = if label.is_empty() { "(no label)" } else { label.as_str() };
                plot_ui.points(
                    Points::new(points)
                        .name(name)
                        .color(rgb.to_color32().gamma_multiply(0.7))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }

            let frontier: Vec<[f64; 2]> = analysis.frontier.iter().map(|f| [f.x, f.y]).collect();
            plot_ui.line(
                Line::new(PlotPoints::from(frontier.clone()))
                    .name("Pareto Frontier")
                    .color(accent)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(frontier))
                    .name("Pareto Frontier")
                    .color(accent)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(6.0),
            );

            if state.chart.show_labels {
                for p in &analysis.points {
                    if p.label.is_empty() || analysis.on_frontier(p) {
                        continue;
                    }
                    plot_ui.text(
                        Text::new(PlotPoint::new(p.x, p.y), RichText::new(&p.label).small())
                            .anchor(Align2::LEFT_BOTTOM),
                    );
                }
                for f in &analysis.frontier {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(f.x, f.y),
                            RichText::new(&f.label).strong().color(accent),
                        )
                        .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            }
        });
}
