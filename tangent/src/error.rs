use thiserror::Error;

pub type TrendResult<T = ()> = Result<T, TrendError>;

#[derive(Debug, Error)]
pub enum TrendError {
  /// Series is malformed or too short for the estimator.
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  /// Out-of-range or incompatible configuration.
  #[error("Invalid parameter: {0}")]
  InvalidParameter(String),

  /// Numerical fitting failure, or a derivative order the fitted
  /// function cannot support.
  #[error("Fit error: {0}")]
  Fit(String),

  /// Ranking window exceeds the rows available in a table.
  #[error("Insufficient data: need {required} rows, found {available}")]
  InsufficientData { required: usize, available: usize },
}
