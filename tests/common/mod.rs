//! Shared helpers: a small deterministic banknote dataset and an artifact
//! fitted on it, so endpoint tests run against a real model without any
//! file on disk.

use billetscan::application::artifact::{FeatureScaler, ModelArtifact};
use billetscan::domain::features::FEATURE_COUNT;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;

/// Cluster center of genuine notes (class 0).
pub const GENUINE: [f64; 6] = [171.81, 104.86, 104.95, 4.52, 2.89, 112.83];

/// Cluster center of counterfeit notes (class 1).
pub const COUNTERFEIT: [f64; 6] = [171.04, 104.16, 104.29, 5.70, 3.30, 111.42];

/// Deterministic two-cluster training set, one cluster per class, plus two
/// mislabeled rows so the logistic optimum stays finite and probabilities
/// stay strictly inside (0, 1).
pub fn training_rows() -> (Vec<Vec<f64>>, Vec<i32>) {
    let mut x: Vec<Vec<f64>> = Vec::new();
    let mut y: Vec<i32> = Vec::new();

    for i in 0..20 {
        let jitter = (i as f64 - 10.0) / 50.0;
        x.push(GENUINE.iter().map(|v| v + jitter).collect());
        y.push(0);
        x.push(COUNTERFEIT.iter().map(|v| v - jitter).collect());
        y.push(1);
    }

    x.push(GENUINE.iter().map(|v| v + 0.05).collect());
    y.push(1);
    x.push(COUNTERFEIT.iter().map(|v| v - 0.05).collect());
    y.push(0);

    (x, y)
}

pub fn fit_scaler(rows: &[Vec<f64>]) -> FeatureScaler {
    let n = rows.len() as f64;

    let mut mean = vec![0.0; FEATURE_COUNT];
    for row in rows {
        for (j, v) in row.iter().enumerate() {
            mean[j] += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut scale = vec![0.0; FEATURE_COUNT];
    for row in rows {
        for (j, v) in row.iter().enumerate() {
            scale[j] += (v - mean[j]).powi(2);
        }
    }
    for s in &mut scale {
        *s = (*s / n).sqrt();
    }

    FeatureScaler { mean, scale }
}

pub fn fit_artifact() -> ModelArtifact {
    let (x, y) = training_rows();
    let scaler = fit_scaler(&x);
    let scaled = scaler.transform(&x);

    let matrix = DenseMatrix::from_2d_vec(&scaled).expect("training matrix");
    let model = LogisticRegression::fit(&matrix, &y, Default::default()).expect("model fit");

    ModelArtifact { model, scaler }
}
