//! Turns a tabular upload into the dense feature matrix the classifier
//! consumes: header mapping, cell parsing, batch-relative mean imputation
//! and reordering into the canonical column order.

use crate::domain::errors::PredictError;
use crate::domain::features::{EXPECTED_COLUMNS, FEATURE_COUNT};

/// Parses a delimited-text upload and returns a dense `[n, 6]` matrix in
/// `EXPECTED_COLUMNS` order, free of missing values.
///
/// Header columns may come in any order; extra columns are ignored. Every
/// expected column must be present, otherwise the whole upload is rejected
/// with the expected/received column lists.
pub fn normalize_csv(bytes: &[u8]) -> Result<Vec<Vec<f64>>, PredictError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let received: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Position of each expected column within the upload.
    let mut indices = Vec::with_capacity(FEATURE_COUNT);
    for column in EXPECTED_COLUMNS {
        match received.iter().position(|h| h == column) {
            Some(idx) => indices.push(idx),
            None => {
                return Err(PredictError::SchemaMismatch {
                    expected: EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                    received,
                });
            }
        }
    }

    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(FEATURE_COUNT);
        for (&idx, column) in indices.iter().zip(EXPECTED_COLUMNS) {
            let cell = record.get(idx).unwrap_or("").trim();
            row.push(parse_cell(cell, row_idx, column)?);
        }
        rows.push(row);
    }

    impute_batch_means(rows)
}

/// An empty cell or a NaN is a missing value; anything else must parse as a
/// number or the upload is rejected.
fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>, PredictError> {
    if cell.is_empty() {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(PredictError::InvalidValue {
            row,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

/// Fills each missing cell with the mean of the values present in the same
/// column of this batch.
///
/// The mean is computed fresh per request, purely to fill gaps. It must not
/// be confused with the scaler's training-time mean, which is a different
/// quantity applied later to every cell.
fn impute_batch_means(rows: Vec<Vec<Option<f64>>>) -> Result<Vec<Vec<f64>>, PredictError> {
    if rows.is_empty() {
        return Err(PredictError::EmptyBatch);
    }

    let mut means = Vec::with_capacity(FEATURE_COUNT);
    for (j, column) in EXPECTED_COLUMNS.iter().enumerate() {
        let present: Vec<f64> = rows.iter().filter_map(|row| row[j]).collect();
        if present.is_empty() {
            return Err(PredictError::EmptyColumn {
                column: column.to_string(),
            });
        }
        means.push(present.iter().sum::<f64>() / present.len() as f64);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(j, cell)| cell.unwrap_or(means[j]))
                .collect()
        })
        .collect())
}
