// Frozen model + scaler bundle and scoring
pub mod artifact;

// Tabular input normalization and imputation
pub mod normalizer;
