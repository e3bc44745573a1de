use serde::{Deserialize, Serialize};

pub trait Y: Clone {
  fn y(&self) -> f64;
}

pub trait X: Clone {
  fn x(&self) -> i64;
}

impl Y for f64 {
  fn y(&self) -> f64 {
    *self
  }
}

impl X for i64 {
  fn x(&self) -> i64 {
    *self
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
  pub x: i64,
  pub y: f64,
}

impl Y for Data {
  fn y(&self) -> f64 {
    self.y.y()
  }
}

impl X for Data {
  fn x(&self) -> i64 {
    self.x.x()
  }
}

/// Time series of (timestamp, value) pairs.
///
/// Timestamps are assumed strictly increasing and unit-spaced. The
/// estimators fit against the index positions 0..n and carry `x`
/// through to the output untouched, so non-unit spacing is never
/// rejected, only ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset(pub Vec<Data>);

impl Dataset {
  pub fn new(data: Vec<Data>) -> Self {
    Self(data)
  }

  /// Build a series from bare values, using the index as timestamp.
  pub fn from_values(values: &[f64]) -> Self {
    Self(
      values
        .iter()
        .enumerate()
        .map(|(i, &y)| Data { x: i as i64, y })
        .collect(),
    )
  }

  pub fn x(&self) -> Vec<i64> {
    self.0.iter().map(|d| d.x()).collect()
  }

  pub fn y(&self) -> Vec<f64> {
    self.0.iter().map(|d| d.y()).collect()
  }

  /// Abscissae the estimators fit against: 0..n as floats.
  pub fn index(&self) -> Vec<f64> {
    (0..self.0.len()).map(|i| i as f64).collect()
  }

  pub fn data(&self) -> &Vec<Data> {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
