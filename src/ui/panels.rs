use std::sync::mpsc::Sender;

use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::data::export;
use crate::jobs::{self, JobOutput};
use crate::predict::client::Outcome;
use crate::state::{SessionState, Status, Tab};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Top bar: menu, tab strip, status banner
// ---------------------------------------------------------------------------

/// Render the top menu / tab bar.
pub fn top_bar(ui: &mut Ui, state: &mut SessionState, jobs: &Sender<JobOutput>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, jobs);
                ui.close_menu();
            }
        });

        ui.separator();

        let tabs = [
            (Tab::Upload, "Upload Data"),
            (Tab::Data, "Data Preview"),
            (Tab::Config, "ML Config"),
            (Tab::Results, "Results"),
        ];
        for (tab, label) in tabs {
            if ui.selectable_label(state.active_tab == tab, label).clicked() {
                state.active_tab = tab;
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} rows × {} columns", ds.len(), ds.columns.len()));
        }

        match &state.status {
            Status::Idle => {}
            Status::Error(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Status::Success(msg) => {
                ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Upload tab
// ---------------------------------------------------------------------------

pub fn upload_tab(ui: &mut Ui, state: &mut SessionState, jobs: &Sender<JobOutput>) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Upload Your Data");
        ui.label("Supported formats: .csv, .xlsx, .xls (first row is the header)");
        ui.add_space(16.0);

        if ui.button("Open file…").clicked() {
            open_file_dialog(state, jobs);
        }

        if state.busy {
            ui.add_space(8.0);
            ui.spinner();
            ui.label("Processing file…");
        }

        if let Some(ds) = &state.dataset {
            ui.add_space(8.0);
            ui.label(format!("Loaded: {}", ds.file_name));
        }
    });
}

// ---------------------------------------------------------------------------
// Data preview tab
// ---------------------------------------------------------------------------

pub fn data_tab(ui: &mut Ui, state: &mut SessionState, jobs: &Sender<JobOutput>) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded. Open a file first  (File → Open…)");
        });
        return;
    }

    let mut can_predict = !state.busy;
    if let Some(dataset) = &state.dataset {
        ui.horizontal(|ui: &mut Ui| {
            ui.heading("Data Preview");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.label(format!(
                    "{} rows × {} columns",
                    dataset.len(),
                    dataset.columns.len()
                ));
            });
        });
        ui.separator();

        table::preview_grid(ui, &dataset.columns, &dataset.rows);
        can_predict &= !dataset.is_empty();
    }

    ui.add_space(12.0);
    let clicked = ui
        .add_enabled(can_predict, egui::Button::new("Generate Predictions"))
        .clicked();
    if state.busy {
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.label("Generating predictions…");
        });
    }

    if clicked {
        if let Some(generation) = state.begin_predict() {
            if let Some(dataset) = state.dataset.clone() {
                jobs::spawn_predict(jobs.clone(), generation, dataset, state.config.clone());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config tab
// ---------------------------------------------------------------------------

pub fn config_tab(ui: &mut Ui, state: &mut SessionState) {
    ui.heading("Prediction Service");
    ui.add_space(8.0);

    egui::Grid::new("config_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Endpoint URL");
            ui.add(
                egui::TextEdit::singleline(&mut state.config.endpoint)
                    .hint_text("https://your-endpoint.example.net/score")
                    .desired_width(420.0),
            );
            ui.end_row();

            ui.label("API key (optional)");
            ui.add(
                egui::TextEdit::singleline(&mut state.config.credential)
                    .password(true)
                    .desired_width(420.0),
            );
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.label("The loaded rows are sent as JSON to the endpoint, which is expected to");
    ui.label("answer with a parallel \"predictions\" array. Without a reachable endpoint");
    ui.label("the app falls back to synthetic values and says so in the results.");
    ui.add_space(4.0);
    ui.small("Settings are kept for this session only and never written to disk.");
}

// ---------------------------------------------------------------------------
// Results tab
// ---------------------------------------------------------------------------

pub fn results_tab(ui: &mut Ui, state: &mut SessionState) {
    if state.augmented.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No predictions yet. Load data and generate predictions first.");
        });
        return;
    }

    let mut export_clicked = false;
    if let (Some(dataset), Some(augmented)) = (&state.dataset, &state.augmented) {
        ui.horizontal(|ui: &mut Ui| {
            ui.heading("Prediction Results");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                if ui
                    .add_enabled(!state.busy, egui::Button::new("Export CSV"))
                    .clicked()
                {
                    export_clicked = true;
                }
            });
        });

        match &augmented.outcome {
            Outcome::Success => {
                ui.label("All predictions returned by the service.");
            }
            Outcome::Partial { synthesized } => {
                ui.label(format!(
                    "{synthesized} of {} predictions synthesized locally to fill the response.",
                    augmented.rows.len()
                ));
            }
            Outcome::Fallback { cause } => {
                ui.label(format!("Synthetic results: {cause}."));
            }
        }
        ui.separator();

        plot::prediction_chart(ui, &augmented.rows);
        ui.add_space(8.0);
        table::results_grid(ui, &dataset.columns, &augmented.rows);
    }

    if export_clicked {
        export_results(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut SessionState, jobs: &Sender<JobOutput>) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", &["csv", "xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        let generation = state.begin_upload();
        jobs::spawn_load(jobs.clone(), generation, path);
    }
}

fn export_results(state: &mut SessionState) {
    let (Some(dataset), Some(augmented)) = (&state.dataset, &state.augmented) else {
        return;
    };

    let default_name = export::export_file_name(&dataset.file_name);
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export predictions")
        .set_file_name(default_name)
        .save_file()
    else {
        return;
    };

    let row_count = augmented.rows.len();
    let result = export::write_csv(&path, &dataset.columns, &augmented.rows);
    match result {
        Ok(()) => {
            log::info!("exported {row_count} rows to {}", path.display());
            state.set_success(format!("Results exported to {}", path.display()));
        }
        Err(e) => {
            log::error!("export failed: {e:#}");
            state.set_error(format!("Export failed: {e:#}"));
        }
    }
}
