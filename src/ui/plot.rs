use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::model::AugmentedRow;

// ---------------------------------------------------------------------------
// Prediction chart (results tab)
// ---------------------------------------------------------------------------

/// Bars shown in the distribution chart.
const CHART_BARS: usize = 20;

/// Render a bar chart of the first predictions, one bar per row.
pub fn prediction_chart(ui: &mut Ui, rows: &[AugmentedRow]) {
    let bars: Vec<Bar> = rows
        .iter()
        .take(CHART_BARS)
        .enumerate()
        .map(|(i, row)| Bar::new(i as f64 + 1.0, row.prediction))
        .collect();

    let chart = BarChart::new(bars)
        .name("prediction")
        .color(Color32::LIGHT_BLUE);

    Plot::new("prediction_chart")
        .x_axis_label("Row")
        .y_axis_label("Prediction")
        .height(220.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
