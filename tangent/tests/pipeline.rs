use tangent::*;

fn accelerating(n: usize) -> Dataset {
  Dataset::from_values(
    &(0..n)
      .map(|i| (i as f64 / 8.0).powi(3))
      .collect::<Vec<f64>>(),
  )
}

fn steady(n: usize) -> Dataset {
  Dataset::from_values(&(0..n).map(|i| i as f64 * 0.8).collect::<Vec<f64>>())
}

fn fading(n: usize) -> Dataset {
  // approaches 40 with a decaying slope
  Dataset::from_values(
    &(0..n)
      .map(|i| 40.0 * (1.0 - (-(i as f64) / 10.0).exp()))
      .collect::<Vec<f64>>(),
  )
}

#[test]
fn sgolay_pipeline_ranks_by_recent_slope() -> anyhow::Result<()> {
  init_logger();

  let cfg = SgolayConfig {
    window_size: 9,
    function_order: 3,
    derivative_order: 1,
  };
  let tables = vec![
    ("accelerating".to_string(), sgolay_trend(&accelerating(40), &cfg)?),
    ("steady".to_string(), sgolay_trend(&steady(40), &cfg)?),
    ("fading".to_string(), sgolay_trend(&fading(40), &cfg)?),
  ];
  for (_, table) in &tables {
    assert_eq!(table.len(), 40);
  }

  let ranked = trending(&tables, 1, 5, Reduction::Avg)?;
  assert_eq!(ranked.len(), 3);
  assert_eq!(ranked.entries[0].id, "accelerating");
  assert_eq!(ranked.entries[1].id, "steady");
  assert_eq!(ranked.entries[2].id, "fading");
  for pair in ranked.entries().windows(2) {
    assert!(pair[0].score >= pair[1].score);
  }
  Ok(())
}

#[test]
fn spline_pipeline_recovers_linear_slope() -> anyhow::Result<()> {
  let table = spline_trend(&steady(30), &SplineConfig::default())?;
  assert_eq!(table.len(), 30);
  for row in table.rows() {
    assert!((row.derivative_value.unwrap() - 0.8).abs() < 1e-4);
  }

  let ranked = trending(&[("steady".to_string(), table)], 1, 5, Reduction::Max)?;
  assert!((ranked.entries[0].score - 0.8).abs() < 1e-4);
  Ok(())
}

#[test]
fn estimators_agree_on_a_smooth_series() -> anyhow::Result<()> {
  // y = x^2 / 10: slope at i is i / 5
  let series = Dataset::from_values(
    &(0..30)
      .map(|i| (i as f64).powi(2) / 10.0)
      .collect::<Vec<f64>>(),
  );

  let naive = naive_trend(&series)?;
  let sgolay = sgolay_trend(
    &series,
    &SgolayConfig {
      window_size: 7,
      function_order: 2,
      derivative_order: 1,
    },
  )?;
  let spline = spline_trend(&series, &SplineConfig::default())?;

  for i in 5..25 {
    let expected = i as f64 / 5.0;
    assert!((naive.rows[i].derivative_value.unwrap() - expected).abs() < 1e-9);
    assert!((sgolay.rows[i].derivative_value.unwrap() - expected).abs() < 1e-6);
    assert!((spline.rows[i].derivative_value.unwrap() - expected).abs() < 1e-4);
  }
  Ok(())
}

#[test]
fn batch_feeds_ranking() -> anyhow::Result<()> {
  let series = vec![
    ("accelerating".to_string(), accelerating(40)),
    ("steady".to_string(), steady(40)),
    ("fading".to_string(), fading(40)),
  ];

  let cfg = SgolayConfig::default();
  let results = trend_many(&series, |s| sgolay_trend(s, &cfg));
  let tables: Vec<(String, TrendTable)> = results
    .into_iter()
    .map(|(id, r)| Ok((id, r?)))
    .collect::<TrendResult<Vec<_>>>()?;

  let ranked = trending(&tables, 1, 3, Reduction::Max)?;
  assert_eq!(ranked.entries[0].id, "accelerating");
  Ok(())
}
