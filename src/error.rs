/// Errors surfaced by the prediction engine.
///
/// Only a dataset that cannot be obtained is an error. An empty prediction
/// is a normal outcome and is returned as `Ok(vec![])`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("cutoff dataset unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },
}

impl PredictionError {
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        PredictionError::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
