/// Prediction layer: the remote scoring client and the synthesized-value
/// generator it degrades to.
pub mod client;
pub mod fallback;
