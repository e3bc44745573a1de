use crate::{TrendError, TrendResult};
use nalgebra::{DMatrix, DVector};

/// Least-squares polynomial coefficients (ascending powers) for the
/// given abscissae, solved through the normal equations.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> TrendResult<Vec<f64>> {
  if x.len() != y.len() || x.len() <= degree {
    return Err(TrendError::InvalidInput(format!(
      "degree {} fit needs more than {} points, got {}",
      degree,
      degree,
      x.len().min(y.len())
    )));
  }

  let n = x.len();
  let mut design = DMatrix::zeros(n, degree + 1);
  for i in 0..n {
    let mut pow = 1.0;
    for j in 0..=degree {
      design[(i, j)] = pow;
      pow *= x[i];
    }
  }

  let y_vector = DVector::from_column_slice(y);
  let coefficients = (design.transpose() * &design)
    .try_inverse()
    .ok_or_else(|| TrendError::Fit("singular normal equations in polynomial fit".to_string()))?
    * design.transpose()
    * y_vector;

  Ok(coefficients.iter().copied().collect())
}

/// Evaluate the `order`-th derivative of a polynomial (ascending
/// coefficients) at `x`. Order 0 is the polynomial itself.
pub fn polyval(coefficients: &[f64], x: f64, order: usize) -> f64 {
  let mut acc = 0.0;
  for (j, &c) in coefficients.iter().enumerate().skip(order) {
    // falling factorial j * (j-1) * .. over `order` terms
    let mut scale = 1.0;
    for m in 0..order {
      scale *= (j - m) as f64;
    }
    acc += c * scale * x.powi((j - order) as i32);
  }
  acc
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recovers_quadratic_exactly() -> anyhow::Result<()> {
    // y = 2x^2 - 3x + 1
    let x: Vec<f64> = (0..7).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&x| 2.0 * x * x - 3.0 * x + 1.0).collect();
    let c = polyfit(&x, &y, 2)?;
    assert!((c[0] - 1.0).abs() < 1e-9);
    assert!((c[1] + 3.0).abs() < 1e-9);
    assert!((c[2] - 2.0).abs() < 1e-9);
    Ok(())
  }

  #[test]
  fn derivative_evaluation() {
    // y = x^3: y' = 3x^2, y'' = 6x
    let c = [0.0, 0.0, 0.0, 1.0];
    assert_eq!(polyval(&c, 2.0, 0), 8.0);
    assert_eq!(polyval(&c, 2.0, 1), 12.0);
    assert_eq!(polyval(&c, 2.0, 2), 12.0);
    assert_eq!(polyval(&c, 2.0, 3), 6.0);
    assert_eq!(polyval(&c, 2.0, 4), 0.0);
  }

  #[test]
  fn rejects_underdetermined_fit() {
    let err = polyfit(&[0.0, 1.0], &[1.0, 2.0], 2).unwrap_err();
    assert!(matches!(err, TrendError::InvalidInput(_)));
  }
}
