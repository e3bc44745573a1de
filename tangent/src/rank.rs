use crate::{TrendError, TrendResult, TrendTable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How a derivative window collapses into one score per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
  Max,
  Avg,
}

impl Reduction {
  pub fn as_str(&self) -> &'static str {
    match self {
      Reduction::Max => "max",
      Reduction::Avg => "avg",
    }
  }
}

impl fmt::Display for Reduction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntity {
  pub id: String,
  pub score: f64,
}

/// Entities ordered by descending score. `reduction` names what the
/// score column holds (max or avg).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTable {
  pub reduction: Reduction,
  pub entries: Vec<RankedEntity>,
}

impl RankedTable {
  pub fn entries(&self) -> &[RankedEntity] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Rank entities by recent trend strength: for each tagged table, keep
/// the rows reporting `derivative_order`, reduce the trailing `k`
/// derivative values via max or mean, and sort the scores descending.
/// Rows without a derivative value (the naive boundaries) are skipped
/// before the trailing window is taken. Tied scores keep their input
/// order. Inputs are only read.
pub fn trending(
  tables: &[(String, TrendTable)],
  derivative_order: usize,
  k: usize,
  reduction: Reduction,
) -> TrendResult<RankedTable> {
  if !(1..=2).contains(&derivative_order) {
    return Err(TrendError::InvalidParameter(format!(
      "ranking supports derivative orders 1 and 2, got {}",
      derivative_order
    )));
  }
  if k == 0 {
    return Err(TrendError::InvalidParameter(
      "ranking window k must be at least 1".to_string(),
    ));
  }

  let mut entries = Vec::with_capacity(tables.len());
  for (id, table) in tables {
    let values: Vec<f64> = table
      .rows()
      .iter()
      .filter(|r| r.derivative_order == derivative_order)
      .filter_map(|r| r.derivative_value)
      .collect();
    if values.len() < k {
      return Err(TrendError::InsufficientData {
        required: k,
        available: values.len(),
      });
    }
    let window = &values[values.len() - k..];
    let score = match reduction {
      Reduction::Max => window.iter().copied().fold(f64::MIN, f64::max),
      Reduction::Avg => window.iter().sum::<f64>() / k as f64,
    };
    entries.push(RankedEntity {
      id: id.clone(),
      score,
    });
  }

  // stable sort, so equal scores stay in input order
  entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
  Ok(RankedTable { reduction, entries })
}
