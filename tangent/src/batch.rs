use crate::{Dataset, TrendResult, TrendTable};
use rayon::prelude::*;

/// Fan one estimator call out across many tagged series. Every call
/// is pure and stateless, so the batch splits cleanly across the
/// rayon pool. Per-series failures come back in place and never
/// short-circuit the rest of the batch.
pub fn trend_many<F>(
  series: &[(String, Dataset)],
  estimator: F,
) -> Vec<(String, TrendResult<TrendTable>)>
where
  F: Fn(&Dataset) -> TrendResult<TrendTable> + Sync,
{
  series
    .par_iter()
    .map(|(id, s)| (id.clone(), estimator(s)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{naive_trend, TrendError};

  #[test]
  fn batch_keeps_order_and_isolates_failures() {
    let series = vec![
      ("a".to_string(), Dataset::from_values(&[1.0, 2.0, 3.0, 4.0])),
      ("too-short".to_string(), Dataset::from_values(&[1.0])),
      ("c".to_string(), Dataset::from_values(&[4.0, 2.0, 0.0])),
    ];
    let results = trend_many(&series, naive_trend);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, "a");
    assert!(results[0].1.is_ok());
    assert!(matches!(
      results[1].1,
      Err(TrendError::InvalidInput(_))
    ));
    assert_eq!(results[2].0, "c");
    assert_eq!(results[2].1.as_ref().unwrap().len(), 3);
  }
}
