use heartstat_analysis::config::ReportConfig;
use heartstat_analysis::dataset::{Column, Dataset};
use heartstat_analysis::error::StatsError;
use heartstat_analysis::normality::{normality_tests, shapiro_wilk, test_column, Normality};
use statrs::distribution::{ContinuousCDF, Normal};

fn normal_quantiles(n: usize) -> Vec<f64> {
    let normal = Normal::new(0.0, 1.0).unwrap();
    (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.5) / n as f64))
        .collect()
}

fn exponential_quantiles(n: usize) -> Vec<f64> {
    (1..=n)
        .map(|i| -(1.0 - (i as f64 - 0.5) / n as f64).ln())
        .collect()
}

fn config_for(columns: &[&str]) -> ReportConfig {
    ReportConfig {
        continuous_columns: columns.iter().map(|s| s.to_string()).collect(),
        ..ReportConfig::default()
    }
}

// ---------------------------------------------------------------------------
// shapiro_wilk
// ---------------------------------------------------------------------------

#[test]
fn matches_published_reference_value() {
    // Weights of 11 men (Royston 1995).
    let weights = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
    let (w, p) = shapiro_wilk(&weights).unwrap();
    assert!((w - 0.78881).abs() < 1e-3, "W = {}", w);
    assert!((p - 0.006704).abs() < 1e-3, "p = {}", p);
}

#[test]
fn three_observations_use_exact_distribution() {
    let (w, p) = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
    assert!((w - 1.0).abs() < 1e-9);
    assert!((p - 1.0).abs() < 1e-6);

    let (w, p) = shapiro_wilk(&[1.0, 2.0, 4.0]).unwrap();
    assert!((w - 0.9643).abs() < 1e-3, "W = {}", w);
    assert!((p - 0.6369).abs() < 1e-3, "p = {}", p);
}

#[test]
fn order_of_observations_does_not_matter() {
    let sorted = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let shuffled = [5.0, 9.0, 4.0, 2.0, 7.0, 4.0, 5.0, 4.0];
    assert_eq!(shapiro_wilk(&sorted), shapiro_wilk(&shuffled));
    let (w, p) = shapiro_wilk(&sorted).unwrap();
    assert!((w - 0.91663).abs() < 1e-3, "W = {}", w);
    assert!((p - 0.40315).abs() < 1e-2, "p = {}", p);
}

#[test]
fn statistic_and_p_value_are_bounded() {
    for sample in [normal_quantiles(50), exponential_quantiles(50), normal_quantiles(12)] {
        let (w, p) = shapiro_wilk(&sample).unwrap();
        assert!(w > 0.0 && w <= 1.0, "W = {}", w);
        assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }
}

#[test]
fn rejects_untestable_samples() {
    assert!(shapiro_wilk(&[1.0, 2.0]).is_none());
    assert!(shapiro_wilk(&[1.0, f64::NAN, 3.0, 4.0]).is_none());
    assert!(shapiro_wilk(&vec![0.0; 5001]).is_none());
}

#[test]
fn constant_sample_is_degenerate_but_valid() {
    assert_eq!(shapiro_wilk(&[7.0, 7.0, 7.0, 7.0]), Some((1.0, 1.0)));
}

// ---------------------------------------------------------------------------
// column level tests
// ---------------------------------------------------------------------------

#[test]
fn classifies_normal_and_skewed_columns() {
    let ds = Dataset::from_columns(vec![
        Column::from_f64("thalach", &normal_quantiles(50)),
        Column::from_f64("oldpeak", &exponential_quantiles(50)),
    ])
    .unwrap();
    let config = config_for(&["thalach", "oldpeak"]);

    let results = normality_tests(&ds, &config);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].column, "thalach");
    assert_eq!(results[0].classification, Normality::Normal);
    assert!(results[0].statistic > 0.99);
    assert_eq!(results[1].classification, Normality::NonNormal);
    assert!(results[1].p_value < 1e-4, "p = {}", results[1].p_value);
    assert_eq!(results[1].classification.label(), "non-normal");
}

#[test]
fn nulls_are_dropped_before_testing() {
    let ds = Dataset::from_columns(vec![Column::numeric(
        "chol",
        vec![Some(10.0), None, Some(20.0), Some(20.0), Some(30.0), Some(-9.0)],
    )])
    .unwrap();
    let result = test_column(&ds, "chol", &config_for(&["chol"])).unwrap();
    assert_eq!(result.sample_size, 5);
    assert!((result.statistic - 0.91985).abs() < 1e-3);
    assert!((result.p_value - 0.52898).abs() < 1e-2);
}

#[test]
fn four_identical_values_are_tested() {
    let ds = Dataset::from_columns(vec![Column::from_f64("age", &[50.0; 4])]).unwrap();
    let result = test_column(&ds, "age", &config_for(&["age"])).unwrap();
    assert_eq!(result.statistic, 1.0);
    assert_eq!(result.p_value, 1.0);
    assert_eq!(result.classification, Normality::Normal);
}

#[test]
fn sample_size_bounds_are_exclusive() {
    let ds = Dataset::from_columns(vec![
        Column::numeric("trestbps", vec![Some(120.0), Some(130.0), Some(140.0), None]),
        Column::numeric("chol", vec![Some(200.0), Some(210.0), None, None]),
    ])
    .unwrap();
    let config = config_for(&["trestbps", "chol", "age"]);

    let err = test_column(&ds, "trestbps", &config).unwrap_err();
    assert!(matches!(err, StatsError::StatisticalPrecondition { .. }));
    assert!(!err.is_fatal());
    assert!(matches!(
        test_column(&ds, "age", &config),
        Err(StatsError::ColumnMissing { .. })
    ));
    assert!(normality_tests(&ds, &config).is_empty());
}
