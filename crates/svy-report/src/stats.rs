//! Weighted descriptive statistics.

use polars::prelude::{AnyValue, DataFrame};

use svy_common::any_to_f64;

use crate::error::{ReportError, Result};

/// Weighted descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedStats {
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    /// Number of observations used (value and weight both present).
    pub n: usize,
}

/// Computes weighted mean, population variance, standard deviation, and the
/// unweighted min/max of a column.
///
/// Rows where either the value or the weight is missing or non-numeric are
/// dropped pairwise. Errors when no usable pair remains or the total weight
/// is not positive.
pub fn weighted_stats(df: &DataFrame, column: &str, weight: &str) -> Result<WeightedStats> {
    let values = df.column(column).map_err(|_| ReportError::ColumnNotFound {
        column: column.to_string(),
    })?;
    let weights = df.column(weight).map_err(|_| ReportError::ColumnNotFound {
        column: weight.to_string(),
    })?;

    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for idx in 0..df.height() {
        let value = any_to_f64(values.get(idx).unwrap_or(AnyValue::Null));
        let w = any_to_f64(weights.get(idx).unwrap_or(AnyValue::Null));
        if let (Some(value), Some(w)) = (value, w) {
            pairs.push((value, w));
        }
    }

    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if pairs.is_empty() || total_weight <= 0.0 {
        return Err(ReportError::NoObservations {
            column: column.to_string(),
        });
    }

    let mean = pairs.iter().map(|(x, w)| x * w).sum::<f64>() / total_weight;
    let variance = pairs
        .iter()
        .map(|(x, w)| w * (x - mean).powi(2))
        .sum::<f64>()
        / total_weight;
    let min = pairs.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let max = pairs
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(WeightedStats {
        mean,
        std_dev: variance.sqrt(),
        variance,
        min,
        max,
        n: pairs.len(),
    })
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn equal_weights_match_plain_statistics() {
        let df = df!(
            "age" => &[20.0f64, 30.0, 40.0],
            "vigt" => &[1.0f64, 1.0, 1.0],
        )
        .unwrap();

        let stats = weighted_stats(&df, "age", "vigt").unwrap();

        assert!((stats.mean - 30.0).abs() < 1e-9);
        assert!((stats.variance - 200.0 / 3.0).abs() < 1e-9);
        assert!((stats.std_dev - stats.variance.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 20.0);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.n, 3);
    }

    #[test]
    fn weights_shift_the_mean() {
        let df = df!(
            "age" => &[20.0f64, 40.0],
            "vigt" => &[3.0f64, 1.0],
        )
        .unwrap();

        let stats = weighted_stats(&df, "age", "vigt").unwrap();
        // (20*3 + 40*1) / 4 = 25
        assert!((stats.mean - 25.0).abs() < 1e-9);
        // 3*(20-25)^2 + 1*(40-25)^2 = 75 + 225 = 300; / 4 = 75
        assert!((stats.variance - 75.0).abs() < 1e-9);
    }

    #[test]
    fn incomplete_pairs_are_dropped() {
        let df = df!(
            "age" => &[Some(20.0f64), None, Some(40.0)],
            "vigt" => &[Some(1.0f64), Some(1.0), None],
        )
        .unwrap();

        let stats = weighted_stats(&df, "age", "vigt").unwrap();
        assert_eq!(stats.n, 1);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn string_columns_parse_numerically() {
        let df = df!(
            "age" => &["20", "n/a", "40"],
            "vigt" => &["1", "1", "1"],
        )
        .unwrap();

        let stats = weighted_stats(&df, "age", "vigt").unwrap();
        assert_eq!(stats.n, 2);
        assert!((stats.mean - 30.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_no_observations() {
        let df = df!(
            "age" => &[None::<f64>],
            "vigt" => &[Some(1.0f64)],
        )
        .unwrap();
        let err = weighted_stats(&df, "age", "vigt").unwrap_err();
        assert!(matches!(err, ReportError::NoObservations { .. }));
    }

    #[test]
    fn unknown_weight_column_is_a_typed_error() {
        let df = df!("age" => &[20.0f64]).unwrap();
        let err = weighted_stats(&df, "age", "ghost").unwrap_err();
        assert!(matches!(err, ReportError::ColumnNotFound { .. }));
    }
}
