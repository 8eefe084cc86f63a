use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::PREDICTION_COLUMN;
use crate::data::model::{AugmentedRow, CellValue, Provenance};

// ---------------------------------------------------------------------------
// Preview grids for the data and results tabs
// ---------------------------------------------------------------------------

/// Rows shown in the grids; prediction and export always cover the full set.
const PREVIEW_ROWS: usize = 10;

fn cell_text(value: &CellValue) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Render the loaded dataset's first rows.
pub fn preview_grid(ui: &mut Ui, columns: &[String], rows: &[Vec<CellValue>]) {
    ui.push_id("preview_grid", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), columns.len())
            .header(20.0, |mut header| {
                for name in columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in rows.iter().take(PREVIEW_ROWS) {
                    body.row(18.0, |mut out| {
                        for value in row {
                            out.col(|ui| {
                                ui.label(cell_text(value));
                            });
                        }
                    });
                }
            });
    });
    truncation_note(ui, rows.len());
}

/// Render augmented rows with the prediction column highlighted. Values the
/// service returned show blue; locally synthesized ones show orange.
pub fn results_grid(ui: &mut Ui, columns: &[String], rows: &[AugmentedRow]) {
    ui.push_id("results_grid", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), columns.len() + 1)
            .header(20.0, |mut header| {
                for name in columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
                header.col(|ui| {
                    ui.label(
                        RichText::new(PREDICTION_COLUMN)
                            .color(Color32::LIGHT_BLUE)
                            .strong(),
                    );
                });
            })
            .body(|mut body| {
                for row in rows.iter().take(PREVIEW_ROWS) {
                    body.row(18.0, |mut out| {
                        for value in &row.values {
                            out.col(|ui| {
                                ui.label(cell_text(value));
                            });
                        }
                        let color = match row.provenance {
                            Provenance::Service => Color32::LIGHT_BLUE,
                            Provenance::Synthesized => Color32::ORANGE,
                        };
                        out.col(|ui| {
                            ui.label(
                                RichText::new(format!("{:.3}", row.prediction))
                                    .color(color)
                                    .strong(),
                            );
                        });
                    });
                }
            });
    });
    truncation_note(ui, rows.len());
}

fn truncation_note(ui: &mut Ui, total: usize) {
    if total > PREVIEW_ROWS {
        ui.small(format!("Showing first {PREVIEW_ROWS} of {total} rows"));
    }
}
