use serde::Serialize;

/// Scoring output for one request batch.
///
/// `predictions[i]` and `probabilities[i]` describe the same input row:
/// the predicted class in {0, 1} and the probability of class 1. Both
/// sequences always have the length of the input batch.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionBatch {
    pub predictions: Vec<i32>,
    pub probabilities: Vec<f64>,
}

impl PredictionBatch {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}
