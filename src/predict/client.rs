use serde_json::Value as JsonValue;
use thiserror::Error;

use super::fallback::FallbackRng;
use crate::data::model::{Dataset, Provenance, RowPrediction};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Remote scoring endpoint settings, edited in the Config tab. Persists
/// across uploads within a session; never written to disk. There is no
/// default endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionConfig {
    pub endpoint: String,
    /// Optional bearer credential; empty means no Authorization header.
    pub credential: String,
}

impl PredictionConfig {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Blocking precondition failures: surfaced to the user, no network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("No prediction endpoint configured")]
    ConfigMissing,
    #[error("No data to send for prediction")]
    NoData,
}

/// Causes absorbed by the fallback path and retained for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictFailure {
    #[error("service returned {status} {reason}")]
    Service { status: u16, reason: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// How a completed prediction run was fulfilled. Fallback and partial runs
/// are never reported as plain successes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every row scored by the service.
    Success,
    /// The service response covered only part of the batch.
    Partial { synthesized: usize },
    /// The service could not be used at all; every value is synthesized.
    Fallback { cause: PredictFailure },
}

/// A completed run: one prediction per dataset row, plus how it went.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub values: Vec<RowPrediction>,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Prediction client
// ---------------------------------------------------------------------------

/// Score a dataset against the configured endpoint.
///
/// Precondition failures return `Err` before any network activity. Past
/// that point the run always completes: service, network, and response
/// shape problems degrade to synthesized values with the cause retained in
/// the outcome. The dataset itself is only read.
pub fn predict(
    dataset: &Dataset,
    config: &PredictionConfig,
    rng: &mut FallbackRng,
) -> Result<Prediction, PredictError> {
    if !config.is_configured() {
        return Err(PredictError::ConfigMissing);
    }
    if dataset.is_empty() {
        return Err(PredictError::NoData);
    }

    let body = request_body(dataset);
    match fetch_entries(config, &body) {
        Ok(entries) => {
            let (values, outcome) = reconcile(dataset.len(), &entries, rng);
            Ok(Prediction { values, outcome })
        }
        Err(cause) => {
            log::warn!("prediction service unusable, synthesizing values: {cause}");
            Ok(Prediction {
                values: synthesize_all(dataset.len(), rng),
                outcome: Outcome::Fallback { cause },
            })
        }
    }
}

/// Build the request payload: `{"data": [<row object>, ...]}` with row
/// objects keyed by column in canonical order.
fn request_body(dataset: &Dataset) -> JsonValue {
    let rows: Vec<JsonValue> = dataset
        .rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::with_capacity(dataset.columns.len());
            for (name, value) in dataset.columns.iter().zip(row) {
                let json = serde_json::to_value(value).unwrap_or(JsonValue::Null);
                object.insert(name.clone(), json);
            }
            JsonValue::Object(object)
        })
        .collect();

    serde_json::json!({ "data": rows })
}

/// Send the one POST and pull the `predictions` entries out of the body.
fn fetch_entries(
    config: &PredictionConfig,
    body: &JsonValue,
) -> Result<Vec<Option<f64>>, PredictFailure> {
    let client = reqwest::blocking::Client::new();
    let mut request = client.post(config.endpoint.trim()).json(body);
    let credential = config.credential.trim();
    if !credential.is_empty() {
        request = request.bearer_auth(credential);
    }

    let response = request
        .send()
        .map_err(|e| PredictFailure::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PredictFailure::Service {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }

    let text = response
        .text()
        .map_err(|e| PredictFailure::Network(e.to_string()))?;
    prediction_entries(&text)
}

/// Parse the response body. The contract is `{"predictions": [number, ...]}`;
/// non-numeric entries are kept as `None` so one bad entry cannot sink the
/// batch.
fn prediction_entries(body: &str) -> Result<Vec<Option<f64>>, PredictFailure> {
    let root: JsonValue =
        serde_json::from_str(body).map_err(|e| PredictFailure::Malformed(e.to_string()))?;

    let entries = root
        .get("predictions")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| PredictFailure::Malformed("missing 'predictions' array".to_string()))?;

    Ok(entries.iter().map(JsonValue::as_f64).collect())
}

/// Align service entries to the dataset by index. Rows past the end of the
/// array, and rows whose entry was not numeric, get a synthesized value;
/// extra entries are ignored.
fn reconcile(
    row_count: usize,
    entries: &[Option<f64>],
    rng: &mut FallbackRng,
) -> (Vec<RowPrediction>, Outcome) {
    let mut synthesized = 0usize;
    let values = (0..row_count)
        .map(|i| match entries.get(i).copied().flatten() {
            Some(value) => RowPrediction {
                value,
                provenance: Provenance::Service,
            },
            None => {
                synthesized += 1;
                RowPrediction {
                    value: rng.next_prediction(),
                    provenance: Provenance::Synthesized,
                }
            }
        })
        .collect();

    let outcome = if synthesized == 0 {
        Outcome::Success
    } else {
        Outcome::Partial { synthesized }
    };
    (values, outcome)
}

fn synthesize_all(row_count: usize, rng: &mut FallbackRng) -> Vec<RowPrediction> {
    (0..row_count)
        .map(|_| RowPrediction {
            value: rng.next_prediction(),
            provenance: Provenance::Synthesized,
        })
        .collect()
}
