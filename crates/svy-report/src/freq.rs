//! Weighted frequency tables.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};

use svy_common::{any_to_f64, any_to_string, parse_i64};

use crate::error::{ReportError, Result};

/// Column name of the weighted counts in a frequency table.
pub const WEIGHTED_N: &str = "Weighted N";
/// Column name of the percentage column in a frequency table.
pub const PERCENT: &str = "%";

/// Builds a weighted frequency table for one column.
///
/// Rows with an empty value or a missing/non-numeric weight are dropped.
/// Each distinct value's weights are summed and expressed as a share of the
/// total in the `%` column, which sums to 100 across the table. When a
/// value-label dictionary is given, coded values are rendered through it;
/// unknown codes keep their raw text. The result is sorted by `%`
/// descending, ties broken by value.
pub fn weighted_freq(
    df: &DataFrame,
    column: &str,
    weight: &str,
    labels: Option<&BTreeMap<u32, String>>,
) -> Result<DataFrame> {
    let values = df.column(column).map_err(|_| ReportError::ColumnNotFound {
        column: column.to_string(),
    })?;
    let weights = df.column(weight).map_err(|_| ReportError::ColumnNotFound {
        column: weight.to_string(),
    })?;

    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for idx in 0..df.height() {
        let value = any_to_string(values.get(idx).unwrap_or(AnyValue::Null));
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let Some(w) = any_to_f64(weights.get(idx).unwrap_or(AnyValue::Null)) else {
            continue;
        };
        *sums.entry(value.to_string()).or_insert(0.0) += w;
    }

    let total: f64 = sums.values().sum();
    if sums.is_empty() || total <= 0.0 {
        return Err(ReportError::NoObservations {
            column: column.to_string(),
        });
    }

    let mut rows: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(value, sum)| (display_value(&value, labels), sum))
        .collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let (display, counts): (Vec<String>, Vec<f64>) = rows.into_iter().unzip();
    let percents: Vec<f64> = counts.iter().map(|count| count / total * 100.0).collect();

    Ok(DataFrame::new(vec![
        Series::new(column.into(), display).into_column(),
        Series::new(WEIGHTED_N.into(), counts).into_column(),
        Series::new(PERCENT.into(), percents).into_column(),
    ])?)
}

/// Renders a raw cell value through the value-label dictionary when it is a
/// known code.
fn display_value(raw: &str, labels: Option<&BTreeMap<u32, String>>) -> String {
    if let Some(labels) = labels
        && let Some(code) = parse_i64(raw)
        && let Ok(code) = u32::try_from(code)
        && let Some(label) = labels.get(&code)
    {
        return label.clone();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn cell_string(df: &DataFrame, name: &str, idx: usize) -> String {
        any_to_string(df.column(name).unwrap().get(idx).unwrap())
    }

    fn cell_f64(df: &DataFrame, name: &str, idx: usize) -> f64 {
        any_to_f64(df.column(name).unwrap().get(idx).unwrap()).unwrap()
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let df = df!(
            "sex" => &[1i32, 2, 2, 1, 2],
            "vigt" => &[0.8f64, 1.3, 0.9, 1.1, 1.0],
        )
        .unwrap();

        let freq = weighted_freq(&df, "sex", "vigt", None).unwrap();

        assert_eq!(freq.height(), 2);
        let total: f64 = (0..freq.height()).map(|idx| cell_f64(&freq, PERCENT, idx)).sum();
        assert!((total - 100.0).abs() < 1e-9, "total was {total}");
    }

    #[test]
    fn rows_are_sorted_by_share_descending() {
        let df = df!(
            "sex" => &[1i32, 2, 2],
            "vigt" => &[1.0f64, 1.0, 1.0],
        )
        .unwrap();

        let labels = BTreeMap::from([(1, "Female".to_string()), (2, "Male".to_string())]);
        let freq = weighted_freq(&df, "sex", "vigt", Some(&labels)).unwrap();

        assert_eq!(cell_string(&freq, "sex", 0), "Male");
        assert_eq!(cell_f64(&freq, WEIGHTED_N, 0), 2.0);
        assert_eq!(cell_string(&freq, "sex", 1), "Female");
        let male_share = cell_f64(&freq, PERCENT, 0);
        assert!((male_share - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_codes_keep_their_raw_text() {
        let df = df!(
            "sex" => &[1i32, 9],
            "vigt" => &[1.0f64, 1.0],
        )
        .unwrap();

        let labels = BTreeMap::from([(1, "Female".to_string())]);
        let freq = weighted_freq(&df, "sex", "vigt", Some(&labels)).unwrap();

        let rendered: Vec<String> = (0..2).map(|idx| cell_string(&freq, "sex", idx)).collect();
        assert!(rendered.contains(&"Female".to_string()));
        assert!(rendered.contains(&"9".to_string()));
    }

    #[test]
    fn missing_values_and_weights_are_dropped() {
        let df = df!(
            "sex" => &[Some(1i32), None, Some(2)],
            "vigt" => &[Some(1.0f64), Some(1.0), None],
        )
        .unwrap();

        let freq = weighted_freq(&df, "sex", "vigt", None).unwrap();
        assert_eq!(freq.height(), 1);
        assert_eq!(cell_string(&freq, "sex", 0), "1");
    }

    #[test]
    fn unknown_column_is_a_typed_error() {
        let df = df!("vigt" => &[1.0f64]).unwrap();
        let err = weighted_freq(&df, "ghost", "vigt", None).unwrap_err();
        assert!(matches!(err, ReportError::ColumnNotFound { .. }));
    }

    #[test]
    fn all_missing_rows_are_no_observations() {
        let df = df!(
            "sex" => &[None::<i32>, None],
            "vigt" => &[Some(1.0f64), Some(1.0)],
        )
        .unwrap();
        let err = weighted_freq(&df, "sex", "vigt", None).unwrap_err();
        assert!(matches!(err, ReportError::NoObservations { .. }));
    }
}
