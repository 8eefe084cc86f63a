use crate::data::model::{AugmentedRow, Dataset};
use crate::jobs::JobOutput;
use crate::predict::client::{Outcome, PredictionConfig};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upload,
    Data,
    Config,
    Results,
}

/// Transient status banner shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Error(String),
    Success(String),
}

/// Prediction results for the current dataset. Row count always matches
/// the dataset; cleared whenever a new upload replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Augmented {
    pub rows: Vec<AugmentedRow>,
    pub outcome: Outcome,
}

/// The full session state, independent of rendering. All mutation goes
/// through whole-transition methods; panels never poke fields mid-update.
pub struct SessionState {
    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Dataset>,

    /// Predictions merged onto the current dataset.
    pub augmented: Option<Augmented>,

    /// Remote endpoint settings; survive uploads within the session.
    pub config: PredictionConfig,

    /// Active view.
    pub active_tab: Tab,

    /// Status / error banner.
    pub status: Status,

    /// Whether a decode or prediction worker is in flight.
    pub busy: bool,

    /// Upload generation. Worker results carry the generation they started
    /// under; stale results are discarded instead of applied.
    generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            dataset: None,
            augmented: None,
            config: PredictionConfig::default(),
            active_tab: Tab::Upload,
            status: Status::Idle,
            busy: false,
            generation: 0,
        }
    }
}

impl SessionState {
    /// Start a new upload. Always allowed: it supersedes any in-flight work
    /// by bumping the generation, so a stale result can never be applied.
    pub fn begin_upload(&mut self) -> u64 {
        self.generation += 1;
        self.busy = true;
        self.status = Status::Idle;
        self.generation
    }

    /// Start a prediction run, unless a worker is already in flight.
    pub fn begin_predict(&mut self) -> Option<u64> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.status = Status::Idle;
        Some(self.generation)
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Status::Error(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.status = Status::Success(message.into());
    }

    /// Apply a worker result. Results from a superseded generation are
    /// dropped wholesale; in particular a prediction started before a new
    /// upload never merges into the replacement dataset.
    pub fn apply(&mut self, output: JobOutput) {
        match output {
            JobOutput::Loaded { generation, result } => {
                if generation != self.generation {
                    log::warn!("discarding stale load result (generation {generation})");
                    return;
                }
                self.busy = false;
                match result {
                    Ok(dataset) => self.install_dataset(dataset),
                    Err(e) => {
                        log::error!("failed to load file: {e:#}");
                        self.status = Status::Error(format!("{e:#}"));
                    }
                }
            }
            JobOutput::Predicted { generation, result } => {
                if generation != self.generation {
                    log::warn!("discarding stale prediction result (generation {generation})");
                    return;
                }
                self.busy = false;
                match result {
                    Ok((rows, outcome)) => self.install_prediction(rows, outcome),
                    Err(e) => self.status = Status::Error(e.to_string()),
                }
            }
        }
    }

    /// Ingest a newly loaded dataset. Prior predictions never survive an
    /// upload, even an empty one.
    fn install_dataset(&mut self, dataset: Dataset) {
        log::info!(
            "loaded {} rows from {} (columns {:?})",
            dataset.len(),
            dataset.file_name,
            dataset.columns
        );

        self.status = if dataset.is_empty() {
            Status::Success(format!("No data rows found in {}", dataset.file_name))
        } else {
            self.active_tab = Tab::Data;
            Status::Success(format!(
                "Successfully loaded {} rows from {}",
                dataset.len(),
                dataset.file_name
            ))
        };
        self.augmented = None;
        self.dataset = Some(dataset);
    }

    fn install_prediction(&mut self, rows: Vec<AugmentedRow>, outcome: Outcome) {
        self.status = match &outcome {
            Outcome::Success => Status::Success(format!(
                "Successfully generated {} predictions",
                rows.len()
            )),
            Outcome::Partial { synthesized } => Status::Success(format!(
                "Generated {} predictions; the response covered only part of the batch, {synthesized} synthesized",
                rows.len()
            )),
            Outcome::Fallback { cause } => Status::Success(format!(
                "Prediction service unusable ({cause}); generated {} synthetic predictions",
                rows.len()
            )),
        };
        self.augmented = Some(Augmented { rows, outcome });
        self.active_tab = Tab::Results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Provenance};
    use crate::predict::client::PredictError;

    fn dataset(name: &str, rows: usize) -> Dataset {
        Dataset {
            file_name: name.to_string(),
            columns: vec!["id".to_string()],
            rows: (0..rows)
                .map(|i| vec![CellValue::Integer(i as i64)])
                .collect(),
        }
    }

    fn augmented_rows(n: usize) -> Vec<AugmentedRow> {
        (0..n)
            .map(|i| AugmentedRow {
                values: vec![CellValue::Integer(i as i64)],
                prediction: i as f64,
                provenance: Provenance::Service,
            })
            .collect()
    }

    #[test]
    fn load_replaces_dataset_and_clears_predictions() {
        let mut state = SessionState::default();
        let g1 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g1,
            result: Ok(dataset("a.csv", 2)),
        });
        let gp = state.begin_predict().expect("idle");
        state.apply(JobOutput::Predicted {
            generation: gp,
            result: Ok((augmented_rows(2), Outcome::Success)),
        });
        assert!(state.augmented.is_some());

        let g2 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g2,
            result: Ok(dataset("b.csv", 3)),
        });

        assert_eq!(state.dataset.as_ref().map(|d| d.file_name.as_str()), Some("b.csv"));
        assert!(state.augmented.is_none());
        assert!(!state.busy);
    }

    #[test]
    fn stale_prediction_is_discarded_after_new_upload() {
        let mut state = SessionState::default();
        let g1 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g1,
            result: Ok(dataset("old.csv", 2)),
        });

        // Prediction goes out against the old dataset...
        let gp = state.begin_predict().expect("idle");

        // ...and a new upload supersedes it before it resolves.
        let g2 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g2,
            result: Ok(dataset("new.csv", 5)),
        });

        state.apply(JobOutput::Predicted {
            generation: gp,
            result: Ok((augmented_rows(2), Outcome::Success)),
        });

        assert_eq!(state.dataset.as_ref().map(|d| d.file_name.as_str()), Some("new.csv"));
        assert!(state.augmented.is_none());
    }

    #[test]
    fn stale_load_is_discarded_and_keeps_busy() {
        let mut state = SessionState::default();
        let g1 = state.begin_upload();
        let g2 = state.begin_upload();
        assert_ne!(g1, g2);

        state.apply(JobOutput::Loaded {
            generation: g1,
            result: Ok(dataset("slow.csv", 9)),
        });
        assert!(state.dataset.is_none());
        assert!(state.busy);

        state.apply(JobOutput::Loaded {
            generation: g2,
            result: Ok(dataset("fast.csv", 1)),
        });
        assert_eq!(state.dataset.as_ref().map(|d| d.file_name.as_str()), Some("fast.csv"));
        assert!(!state.busy);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = SessionState::default();
        let g1 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g1,
            result: Ok(dataset("kept.csv", 2)),
        });

        let g2 = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g2,
            result: Err(anyhow::anyhow!("decode failed")),
        });

        assert_eq!(state.dataset.as_ref().map(|d| d.file_name.as_str()), Some("kept.csv"));
        assert!(matches!(state.status, Status::Error(_)));
        assert!(!state.busy);
    }

    #[test]
    fn empty_file_reports_no_data_and_stays_on_upload() {
        let mut state = SessionState::default();
        let g = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g,
            result: Ok(dataset("blank.csv", 0)),
        });

        assert_eq!(state.active_tab, Tab::Upload);
        assert_eq!(
            state.status,
            Status::Success("No data rows found in blank.csv".to_string())
        );
    }

    #[test]
    fn predict_is_rejected_while_busy() {
        let mut state = SessionState::default();
        state.begin_upload();
        assert!(state.begin_predict().is_none());
    }

    #[test]
    fn precondition_failures_surface_as_blocking_errors() {
        let mut state = SessionState::default();
        let g = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g,
            result: Ok(dataset("a.csv", 1)),
        });

        let gp = state.begin_predict().expect("idle");
        state.apply(JobOutput::Predicted {
            generation: gp,
            result: Err(PredictError::ConfigMissing),
        });

        assert_eq!(
            state.status,
            Status::Error("No prediction endpoint configured".to_string())
        );
        assert!(state.augmented.is_none());
    }

    #[test]
    fn fallback_outcome_is_worded_distinctly_from_success() {
        let mut state = SessionState::default();
        let g = state.begin_upload();
        state.apply(JobOutput::Loaded {
            generation: g,
            result: Ok(dataset("a.csv", 1)),
        });

        let gp = state.begin_predict().expect("idle");
        let cause = crate::predict::client::PredictFailure::Service {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        state.apply(JobOutput::Predicted {
            generation: gp,
            result: Ok((augmented_rows(1), Outcome::Fallback { cause })),
        });

        match &state.status {
            Status::Success(msg) => {
                assert!(msg.contains("synthetic"));
                assert!(msg.contains("500"));
            }
            other => panic!("expected informational status, got {other:?}"),
        }
    }
}
