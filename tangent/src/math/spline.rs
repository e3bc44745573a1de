use crate::{Dataset, DerivativeMethod, TrendError, TrendResult, TrendRow, TrendTable};
use log::debug;
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, Copy)]
pub struct SplineConfig {
  /// Spline degree, 1 through 5.
  pub function_order: usize,
  /// 0, 1, or 2. Must not exceed `function_order`.
  pub derivative_order: usize,
  /// Residual tolerance of the fit. 0 forces interpolation through
  /// every point; None picks m - sqrt(2m) for a series of m points.
  pub smoothing: Option<f64>,
}

impl Default for SplineConfig {
  fn default() -> Self {
    Self {
      function_order: 3,
      derivative_order: 1,
      smoothing: None,
    }
  }
}

/// A fitted function evaluable anywhere on its domain, along with its
/// analytic derivatives.
pub trait Curve: Send + Sync {
  fn value(&self, x: f64) -> f64;
  /// `order`-th analytic derivative at `x`. Order 0 is the value.
  fn derivative(&self, x: f64, order: usize) -> f64;
}

/// Capability seam for the smoothing fit: turns (x, y) samples into an
/// evaluable curve of the given degree whose residual sum of squares
/// stays within `tolerance`.
pub trait CurveFitter {
  fn fit(&self, x: &[f64], y: &[f64], order: usize, tolerance: f64)
    -> TrendResult<Box<dyn Curve>>;
}

/// Clamped B-spline: coefficients over a Cox-de Boor basis.
#[derive(Debug, Clone)]
pub struct BSpline {
  degree: usize,
  knots: Vec<f64>,
  coefficients: Vec<f64>,
}

impl BSpline {
  /// Cox-de Boor basis function B(i, k) at `x`. The final span is
  /// closed on the right so the domain endpoint evaluates cleanly.
  fn basis(knots: &[f64], i: usize, k: usize, x: f64) -> f64 {
    if k == 0 {
      let end = knots[knots.len() - 1];
      let inside = (x >= knots[i] && x < knots[i + 1])
        || (x == end && knots[i] < knots[i + 1] && knots[i + 1] == end);
      return if inside { 1.0 } else { 0.0 };
    }
    let mut value = 0.0;
    let left = knots[i + k] - knots[i];
    if left > 0.0 {
      value += (x - knots[i]) / left * Self::basis(knots, i, k - 1, x);
    }
    let right = knots[i + k + 1] - knots[i + 1];
    if right > 0.0 {
      value += (knots[i + k + 1] - x) / right * Self::basis(knots, i + 1, k - 1, x);
    }
    value
  }

  fn eval(&self, x: f64) -> f64 {
    self
      .coefficients
      .iter()
      .enumerate()
      .map(|(i, &c)| c * Self::basis(&self.knots, i, self.degree, x))
      .sum()
  }

  /// Derivative spline of one degree lower, by coefficient
  /// differencing. Caller guarantees degree >= 1.
  fn differentiate(&self) -> BSpline {
    let k = self.degree;
    let mut coefficients = Vec::with_capacity(self.coefficients.len() - 1);
    for i in 0..self.coefficients.len() - 1 {
      let span = self.knots[i + k + 1] - self.knots[i + 1];
      let c = if span > 0.0 {
        k as f64 * (self.coefficients[i + 1] - self.coefficients[i]) / span
      } else {
        0.0
      };
      coefficients.push(c);
    }
    BSpline {
      degree: k - 1,
      knots: self.knots[1..self.knots.len() - 1].to_vec(),
      coefficients,
    }
  }
}

impl Curve for BSpline {
  fn value(&self, x: f64) -> f64 {
    self.eval(x)
  }

  fn derivative(&self, x: f64, order: usize) -> f64 {
    if order > self.degree {
      return 0.0;
    }
    let mut spline = self.clone();
    for _ in 0..order {
      spline = spline.differentiate();
    }
    spline.eval(x)
  }
}

fn knot_vector(x0: f64, xn: f64, degree: usize, interior: usize) -> Vec<f64> {
  let mut knots = Vec::with_capacity(2 * (degree + 1) + interior);
  knots.extend(std::iter::repeat(x0).take(degree + 1));
  let step = (xn - x0) / (interior + 1) as f64;
  for j in 1..=interior {
    knots.push(x0 + step * j as f64);
  }
  knots.extend(std::iter::repeat(xn).take(degree + 1));
  knots
}

/// Least-squares B-spline over uniformly placed interior knots.
/// Returns the spline and its residual sum of squares.
fn lsq_bspline(
  x: &[f64],
  y: &[f64],
  degree: usize,
  interior: usize,
) -> TrendResult<(BSpline, f64)> {
  let n = x.len();
  let basis_count = degree + 1 + interior;
  let knots = knot_vector(x[0], x[n - 1], degree, interior);

  let mut design = DMatrix::zeros(n, basis_count);
  for i in 0..n {
    for j in 0..basis_count {
      design[(i, j)] = BSpline::basis(&knots, j, degree, x[i]);
    }
  }

  let y_vector = DVector::from_column_slice(y);
  let coefficients = (design.transpose() * &design)
    .try_inverse()
    .ok_or_else(|| TrendError::Fit("singular normal equations in spline fit".to_string()))?
    * design.transpose()
    * &y_vector;

  let residual = &design * &coefficients - &y_vector;
  let rss = residual.iter().map(|r| r * r).sum::<f64>();
  let spline = BSpline {
    degree,
    knots,
    coefficients: coefficients.iter().copied().collect(),
  };
  Ok((spline, rss))
}

/// Default fitter: refit with twice the interior knots until the
/// residual satisfies the tolerance. At n basis functions the system
/// is square and the spline interpolates, so the loop always lands.
pub struct BSplineFitter;

impl CurveFitter for BSplineFitter {
  fn fit(
    &self,
    x: &[f64],
    y: &[f64],
    order: usize,
    tolerance: f64,
  ) -> TrendResult<Box<dyn Curve>> {
    let n = x.len();
    if n != y.len() || n == 0 {
      return Err(TrendError::InvalidInput(format!(
        "mismatched or empty samples: {} x, {} y",
        n,
        y.len()
      )));
    }
    if order >= n {
      return Err(TrendError::Fit(format!(
        "degree {} spline needs at least {} points, got {}",
        order,
        order + 1,
        n
      )));
    }

    let max_interior = n - order - 1;
    let mut interior = if tolerance <= 0.0 { max_interior } else { 0 };
    loop {
      let (spline, rss) = lsq_bspline(x, y, order, interior)?;
      if rss <= tolerance || interior >= max_interior {
        debug!(
          "spline fit: degree {}, {} interior knots, rss {}",
          order, interior, rss
        );
        return Ok(Box::new(spline));
      }
      interior = (interior * 2 + 1).min(max_interior);
    }
  }
}

/// Smoothing-spline trend with the default B-spline fitter.
pub fn spline_trend(series: &Dataset, cfg: &SplineConfig) -> TrendResult<TrendTable> {
  spline_trend_with(&BSplineFitter, series, cfg)
}

/// Fit a smoothing spline to (index, value) and report the fitted
/// value plus its `derivative_order`-th analytic derivative at every
/// input timestamp. The spline is defined over the whole domain, so no
/// boundary rows are dropped.
pub fn spline_trend_with(
  fitter: &dyn CurveFitter,
  series: &Dataset,
  cfg: &SplineConfig,
) -> TrendResult<TrendTable> {
  let SplineConfig {
    function_order,
    derivative_order,
    smoothing,
  } = *cfg;

  if !(1..=5).contains(&function_order) {
    return Err(TrendError::InvalidParameter(format!(
      "spline degree must be 1 through 5, got {}",
      function_order
    )));
  }
  if derivative_order > function_order {
    // every derivative past the degree is identically zero; flag it
    // instead of handing back a flat line
    return Err(TrendError::Fit(format!(
      "derivative order {} exceeds spline degree {}",
      derivative_order, function_order
    )));
  }
  if derivative_order > 2 {
    return Err(TrendError::InvalidParameter(format!(
      "derivative order must be 0, 1, or 2, got {}",
      derivative_order
    )));
  }
  let n = series.len();
  if function_order >= n {
    return Err(TrendError::Fit(format!(
      "degree {} spline needs at least {} points, got {}",
      function_order,
      function_order + 1,
      n
    )));
  }
  let tolerance = match smoothing {
    Some(s) if s < 0.0 => {
      return Err(TrendError::InvalidParameter(format!(
        "smoothing must be non-negative, got {}",
        s
      )))
    }
    Some(s) => s,
    None => n as f64 - (2.0 * n as f64).sqrt(),
  };

  let x = series.index();
  let y = series.y();
  let curve = fitter.fit(&x, &y, function_order, tolerance)?;

  let rows = series
    .data()
    .iter()
    .zip(x.iter())
    .map(|(d, &xi)| TrendRow {
      x: d.x,
      function_order: Some(function_order),
      smoothed_value: Some(curve.value(xi)),
      method: DerivativeMethod::Spline,
      derivative_order,
      derivative_value: Some(curve.derivative(xi, derivative_order)),
    })
    .collect();

  Ok(TrendTable {
    method: DerivativeMethod::Spline,
    rows,
  })
}
