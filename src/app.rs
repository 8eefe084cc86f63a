use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use eframe::egui;

use crate::jobs::JobOutput;
use crate::state::{SessionState, Tab};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AugurApp {
    pub state: SessionState,
    jobs_tx: Sender<JobOutput>,
    jobs_rx: Receiver<JobOutput>,
}

impl Default for AugurApp {
    fn default() -> Self {
        let (jobs_tx, jobs_rx) = channel();
        Self {
            state: SessionState::default(),
            jobs_tx,
            jobs_rx,
        }
    }
}

impl eframe::App for AugurApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Workers report over the channel; results from a superseded upload
        // generation are dropped inside `apply`.
        while let Ok(output) = self.jobs_rx.try_recv() {
            self.state.apply(output);
        }
        if self.state.busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let Self {
            state, jobs_tx, ..
        } = self;

        // ---- Top panel: menu, tabs, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state, jobs_tx);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match state.active_tab {
            Tab::Upload => panels::upload_tab(ui, state, jobs_tx),
            Tab::Data => panels::data_tab(ui, state, jobs_tx),
            Tab::Config => panels::config_tab(ui, state),
            Tab::Results => panels::results_tab(ui, state),
        });
    }
}
