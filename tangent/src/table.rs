use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivativeMethod {
  Naive,
  SavitzkyGolay,
  Spline,
}

impl DerivativeMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      DerivativeMethod::Naive => "naive",
      DerivativeMethod::SavitzkyGolay => "savitzky-golay",
      DerivativeMethod::Spline => "spline",
    }
  }
}

impl fmt::Display for DerivativeMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One trend estimate. Field order matches the downstream column
/// contract: datetime, function_order, smoothed_value,
/// derivative_method, derivative_order, derivative_value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendRow {
  #[serde(rename = "datetime")]
  pub x: i64,
  /// Degree of the fitted function. None for the naive method, which
  /// fits nothing.
  pub function_order: Option<usize>,
  /// Fitted value at `x`. None for the naive method.
  pub smoothed_value: Option<f64>,
  #[serde(rename = "derivative_method")]
  pub method: DerivativeMethod,
  /// 0 = smoothed value itself, 1 = slope, 2 = curvature.
  pub derivative_order: usize,
  /// None only at the naive estimator's boundary rows.
  pub derivative_value: Option<f64>,
}

/// Output of one estimator call: one row per input timestamp, aligned
/// to the input index. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendTable {
  pub method: DerivativeMethod,
  pub rows: Vec<TrendRow>,
}

impl TrendTable {
  pub fn rows(&self) -> &[TrendRow] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn derivatives(&self) -> Vec<Option<f64>> {
    self.rows.iter().map(|r| r.derivative_value).collect()
  }

  pub fn smoothed(&self) -> Vec<Option<f64>> {
    self.rows.iter().map(|r| r.smoothed_value).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_serializes_to_contract_columns() -> anyhow::Result<()> {
    let row = TrendRow {
      x: 1325376000,
      function_order: Some(3),
      smoothed_value: Some(2.0),
      method: DerivativeMethod::SavitzkyGolay,
      derivative_order: 1,
      derivative_value: Some(0.5),
    };
    let json = serde_json::to_string(&row)?;
    assert_eq!(
      json,
      "{\"datetime\":1325376000,\"function_order\":3,\"smoothed_value\":2.0,\
       \"derivative_method\":\"savitzky-golay\",\"derivative_order\":1,\
       \"derivative_value\":0.5}"
    );
    Ok(())
  }

  #[test]
  fn method_labels() {
    assert_eq!(DerivativeMethod::Naive.as_str(), "naive");
    assert_eq!(DerivativeMethod::SavitzkyGolay.as_str(), "savitzky-golay");
    assert_eq!(DerivativeMethod::Spline.as_str(), "spline");
  }
}
