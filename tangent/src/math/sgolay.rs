use crate::{
  polyfit, polyval, Dataset, DerivativeMethod, TrendError, TrendResult, TrendRow, TrendTable,
};
use nalgebra::DMatrix;

#[derive(Debug, Clone, Copy)]
pub struct SgolayConfig {
  /// Sliding window length. Must be odd and no longer than the series.
  pub window_size: usize,
  /// Degree of the local polynomial. Must be below `window_size`.
  pub function_order: usize,
  /// 0, 1, or 2. Must not exceed `function_order`.
  pub derivative_order: usize,
}

impl Default for SgolayConfig {
  fn default() -> Self {
    Self {
      window_size: 15,
      function_order: 3,
      derivative_order: 1,
    }
  }
}

fn factorial(n: usize) -> f64 {
  (1..=n).map(|m| m as f64).product()
}

/// Pseudo-inverse of the centered Vandermonde over the window. Row
/// `d` of the result, scaled by d!, is the convolution weight vector
/// yielding the d-th derivative at the window center.
fn sgolay_pinv(offsets: &[f64], degree: usize) -> TrendResult<DMatrix<f64>> {
  let m = offsets.len();
  let mut design = DMatrix::zeros(m, degree + 1);
  for i in 0..m {
    let mut pow = 1.0;
    for j in 0..=degree {
      design[(i, j)] = pow;
      pow *= offsets[i];
    }
  }
  let gram = (design.transpose() * &design)
    .try_inverse()
    .ok_or_else(|| TrendError::Fit("singular window in savitzky-golay fit".to_string()))?;
  Ok(gram * design.transpose())
}

/// Savitzky-Golay trend: least-squares polynomial over a sliding,
/// centered window, evaluated through fixed convolution weights. One
/// pass yields both the smoothed value and the requested derivative.
///
/// The first and last `window_size / 2` points fall outside any
/// centered window; they are evaluated from the polynomial fitted to
/// the first/last full window, so the output always has one row per
/// input point.
pub fn sgolay_trend(series: &Dataset, cfg: &SgolayConfig) -> TrendResult<TrendTable> {
  let SgolayConfig {
    window_size,
    function_order,
    derivative_order,
  } = *cfg;
  let n = series.len();

  if window_size % 2 == 0 {
    return Err(TrendError::InvalidParameter(format!(
      "window size must be odd, got {}",
      window_size
    )));
  }
  if window_size > n {
    return Err(TrendError::InvalidParameter(format!(
      "window size {} exceeds series length {}",
      window_size, n
    )));
  }
  if function_order >= window_size {
    return Err(TrendError::InvalidParameter(format!(
      "function order {} must be below window size {}",
      function_order, window_size
    )));
  }
  if derivative_order > function_order {
    return Err(TrendError::InvalidParameter(format!(
      "derivative order {} exceeds function order {}",
      derivative_order, function_order
    )));
  }
  if derivative_order > 2 {
    return Err(TrendError::InvalidParameter(format!(
      "derivative order must be 0, 1, or 2, got {}",
      derivative_order
    )));
  }

  let half = window_size / 2;
  let y = series.y();
  let offsets: Vec<f64> = (0..window_size)
    .map(|j| j as f64 - half as f64)
    .collect();

  let pinv = sgolay_pinv(&offsets, function_order)?;
  let deriv_scale = factorial(derivative_order);

  // one full polynomial fit per boundary window
  let head = polyfit(&offsets, &y[..window_size], function_order)?;
  let tail = polyfit(&offsets, &y[n - window_size..], function_order)?;

  let mut rows = Vec::with_capacity(n);
  for (i, d) in series.data().iter().enumerate() {
    let (smoothed, derivative) = if i < half {
      let x = i as f64 - half as f64;
      (polyval(&head, x, 0), polyval(&head, x, derivative_order))
    } else if i + half >= n {
      let x = (i + window_size - n) as f64 - half as f64;
      (polyval(&tail, x, 0), polyval(&tail, x, derivative_order))
    } else {
      let window = &y[i - half..=i + half];
      let smoothed = pinv
        .row(0)
        .iter()
        .zip(window)
        .map(|(w, v)| w * v)
        .sum::<f64>();
      let derivative = deriv_scale
        * pinv
          .row(derivative_order)
          .iter()
          .zip(window)
          .map(|(w, v)| w * v)
          .sum::<f64>();
      (smoothed, derivative)
    };
    rows.push(TrendRow {
      x: d.x,
      function_order: Some(function_order),
      smoothed_value: Some(smoothed),
      method: DerivativeMethod::SavitzkyGolay,
      derivative_order,
      derivative_value: Some(derivative),
    });
  }

  Ok(TrendTable {
    method: DerivativeMethod::SavitzkyGolay,
    rows,
  })
}
