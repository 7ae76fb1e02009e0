use thiserror::Error;

/// Errors raised while loading the model artifact at startup
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found at {path}")]
    NotFound { path: String },

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to deserialize model artifact: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("invalid model artifact: {reason}")]
    Invalid { reason: String },
}

/// Errors raised while normalizing or scoring a prediction batch
#[derive(Debug, Error)]
pub enum PredictError {
    // Message format is part of the external contract; callers string-match it.
    #[error("Colonnes attendues : {expected:?}, colonnes reçues : {received:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        received: Vec<String>,
    },

    #[error("failed to parse upload: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid numeric value {value:?} for column {column} (data row {row})")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("column {column} has no values, cannot impute a batch mean")]
    EmptyColumn { column: String },

    #[error("empty batch, nothing to score")]
    EmptyBatch,

    #[error("batch of {rows} rows exceeds the limit of {limit}")]
    BatchTooLarge { rows: usize, limit: usize },

    #[error("inference failed: {reason}")]
    Inference { reason: String },
}

impl PredictError {
    /// Upload columns required by the model but absent from the header.
    pub fn missing_columns(&self) -> Vec<&str> {
        match self {
            PredictError::SchemaMismatch { expected, received } => expected
                .iter()
                .filter(|col| !received.contains(col))
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_formatting() {
        let err = PredictError::SchemaMismatch {
            expected: vec!["diagonal".to_string(), "margin_up".to_string()],
            received: vec!["diagonal".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.starts_with("Colonnes attendues :"));
        assert!(msg.contains("colonnes reçues :"));
        assert!(msg.contains("margin_up"));
        assert_eq!(err.missing_columns(), vec!["margin_up"]);
    }

    #[test]
    fn test_batch_too_large_formatting() {
        let err = PredictError::BatchTooLarge {
            rows: 20_000,
            limit: 10_000,
        };

        let msg = err.to_string();
        assert!(msg.contains("20000"));
        assert!(msg.contains("10000"));
    }

    #[test]
    fn test_artifact_not_found_formatting() {
        let err = ArtifactError::NotFound {
            path: "data/model/billet_artifact.json".to_string(),
        };
        assert!(err.to_string().contains("billet_artifact.json"));
    }
}
