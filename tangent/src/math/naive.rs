use crate::{Dataset, DerivativeMethod, TrendError, TrendResult, TrendRow, TrendTable};

/// Central-difference slope of the series at every interior point:
/// the average of the forward and backward unit differences, i.e.
/// (y[i+1] - y[i-1]) / 2. The first and last points have no symmetric
/// neighbor, so their rows carry no derivative rather than a
/// one-sided guess. No smoothing happens, only first derivatives.
pub fn naive_trend(series: &Dataset) -> TrendResult<TrendTable> {
  if series.len() < 3 {
    return Err(TrendError::InvalidInput(format!(
      "naive trend needs at least 3 points, got {}",
      series.len()
    )));
  }

  let y = series.y();
  let n = y.len();
  let mut rows = Vec::with_capacity(n);
  for (i, d) in series.data().iter().enumerate() {
    let derivative_value = if i == 0 || i == n - 1 {
      None
    } else {
      Some((y[i + 1] - y[i - 1]) / 2.0)
    };
    rows.push(TrendRow {
      x: d.x,
      function_order: None,
      smoothed_value: None,
      method: DerivativeMethod::Naive,
      derivative_order: 1,
      derivative_value,
    });
  }

  Ok(TrendTable {
    method: DerivativeMethod::Naive,
    rows,
  })
}
