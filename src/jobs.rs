use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use crate::data::merge::merge;
use crate::data::model::{AugmentedRow, Dataset};
use crate::data::{decode, normalize};
use crate::predict::client::{self, Outcome, PredictError, PredictionConfig};
use crate::predict::fallback::FallbackRng;

// ---------------------------------------------------------------------------
// Background workers
// ---------------------------------------------------------------------------

/// Typed result of a worker, tagged with the generation it started under.
/// The session state drops results whose generation has been superseded.
pub enum JobOutput {
    Loaded {
        generation: u64,
        result: anyhow::Result<Dataset>,
    },
    Predicted {
        generation: u64,
        result: Result<(Vec<AugmentedRow>, Outcome), PredictError>,
    },
}

/// Decode and normalize a file on a worker thread.
pub fn spawn_load(tx: Sender<JobOutput>, generation: u64, path: PathBuf) {
    thread::spawn(move || {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let result = decode::decode_file(&path)
            .map(|records| normalize::normalize(&file_name, records));

        if tx.send(JobOutput::Loaded { generation, result }).is_err() {
            log::warn!("load worker finished after the UI went away");
        }
    });
}

/// Score the dataset and merge the predictions on a worker thread.
pub fn spawn_predict(
    tx: Sender<JobOutput>,
    generation: u64,
    dataset: Dataset,
    config: PredictionConfig,
) {
    thread::spawn(move || {
        let mut rng = FallbackRng::from_clock();
        let result = client::predict(&dataset, &config, &mut rng)
            .map(|prediction| (merge(&dataset, &prediction.values), prediction.outcome));

        if tx.send(JobOutput::Predicted { generation, result }).is_err() {
            log::warn!("prediction worker finished after the UI went away");
        }
    });
}
