use crate::domain::errors::{ArtifactError, PredictError};
use crate::domain::features::FEATURE_COUNT;
use crate::domain::types::PredictionBatch;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Binary classifier over the six banknote measurements.
pub type BilletModel = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Per-feature affine transform fitted at training time.
///
/// `transform` applies `(x - mean[i]) / scale[i]` column by column. The
/// parameters are frozen together with the model; they are unrelated to any
/// statistic computed over a request batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler {
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .zip(self.mean.iter().zip(self.scale.iter()))
                    .map(|(x, (mean, scale))| (x - mean) / scale)
                    .collect()
            })
            .collect()
    }
}

/// Frozen classifier plus its companion scaler.
///
/// Loaded once at startup and shared read-only for the process lifetime.
/// Both components were fitted on the same feature ordering; `score` is the
/// only consumer and always presents scaled features in that order.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: BilletModel,
    pub scaler: FeatureScaler,
}

impl ModelArtifact {
    /// Loads the serialized bundle. Any failure here must abort startup:
    /// the service never accepts traffic without a valid model.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;
        artifact.validate()?;

        info!("Loaded model artifact from {:?}", path);
        Ok(artifact)
    }

    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.scaler.mean.len() != FEATURE_COUNT || self.scaler.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::Invalid {
                reason: format!(
                    "scaler is fitted for {} features, expected {}",
                    self.scaler.mean.len(),
                    FEATURE_COUNT
                ),
            });
        }
        if self
            .scaler
            .scale
            .iter()
            .any(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(ArtifactError::Invalid {
                reason: "scaler contains a zero or non-finite scale factor".to_string(),
            });
        }
        Ok(())
    }

    /// Scales a dense batch with the training-time parameters and scores it.
    ///
    /// Rows must already be in `EXPECTED_COLUMNS` order and free of missing
    /// values; the normalizer and the JSON schema guarantee that upstream.
    pub fn score(&self, rows: &[Vec<f64>]) -> Result<PredictionBatch, PredictError> {
        let scaled = self.scaler.transform(rows);

        let matrix = DenseMatrix::from_2d_vec(&scaled).map_err(|e| PredictError::Inference {
            reason: format!("matrix creation failed: {}", e),
        })?;

        let predictions = self
            .model
            .predict(&matrix)
            .map_err(|e| PredictError::Inference {
                reason: format!("prediction failed: {}", e),
            })?;

        let probabilities = scaled
            .iter()
            .map(|row| self.positive_probability(row))
            .collect();

        Ok(PredictionBatch {
            predictions,
            probabilities,
        })
    }

    /// Probability of class 1 for one scaled row.
    ///
    /// smartcore exposes no probability call for logistic models, so this
    /// takes the sigmoid of the fitted linear margin directly. For a binary
    /// model the coefficients form a single row.
    fn positive_probability(&self, scaled_row: &[f64]) -> f64 {
        let coefficients = self.model.coefficients();
        let intercept = *self.model.intercept().get((0, 0));

        let margin: f64 = scaled_row
            .iter()
            .enumerate()
            .map(|(j, x)| *coefficients.get((0, j)) * x)
            .sum::<f64>()
            + intercept;

        1.0 / (1.0 + (-margin).exp())
    }
}
