use serde::Deserialize;

/// Ordered list of measurement columns.
/// This order MUST match exactly the order the classifier and scaler were
/// fitted with. Any change here is a breaking change for deployed artifacts.
pub const EXPECTED_COLUMNS: &[&str] = &[
    "diagonal",
    "height_left",
    "height_right",
    "margin_low",
    "margin_up",
    "length",
];

/// Number of measurements per banknote observation.
pub const FEATURE_COUNT: usize = EXPECTED_COLUMNS.len();

/// One banknote observation as submitted to the JSON endpoint.
///
/// All six measurements are required and numeric; the ingress layer rejects
/// anything else before the scoring pipeline runs, so no imputation happens
/// on this path.
#[derive(Debug, Clone, Deserialize)]
pub struct BilletMeasurement {
    pub diagonal: f64,
    pub height_left: f64,
    pub height_right: f64,
    pub margin_low: f64,
    pub margin_up: f64,
    pub length: f64,
}

impl BilletMeasurement {
    /// Converts the record into a feature vector in `EXPECTED_COLUMNS` order.
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.diagonal,
            self.height_left,
            self.height_right,
            self.margin_low,
            self.margin_up,
            self.length,
        ]
    }
}
