use heartstat_analysis::correlation::{correlation_matrix, round_to, target_correlations};
use heartstat_analysis::dataset::{Column, Dataset};
use heartstat_analysis::error::StatsError;

fn dataset() -> Dataset {
    Dataset::from_columns(vec![
        Column::from_f64("age", &[40.0, 50.0, 60.0, 70.0, 55.0]),
        Column::from_f64("thalach", &[180.0, 160.0, 150.0, 120.0, 170.0]),
        Column::numeric(
            "chol",
            vec![Some(200.0), Some(260.0), None, Some(230.0), Some(210.0)],
        ),
        Column::from_f64("fbs", &[1.0, 1.0, 1.0, 1.0, 1.0]),
        Column::text(
            "thal",
            vec![Some("normal".into()), None, None, None, Some("fixed".into())],
        ),
        Column::from_f64("num", &[0.0, 1.0, 2.0, 3.0, 1.0]),
    ])
    .unwrap()
}

#[test]
fn matrix_is_symmetric_with_unit_diagonal() {
    let matrix = correlation_matrix(&dataset());
    assert_eq!(matrix.columns, vec!["age", "thalach", "chol", "fbs", "num"]);
    assert!(matrix.values.is_square());

    for a in &matrix.columns {
        for b in &matrix.columns {
            let ab = matrix.get(a, b).unwrap();
            let ba = matrix.get(b, a).unwrap();
            assert!(ab.to_bits() == ba.to_bits(), "{} / {}", a, b);
            if ab.is_finite() {
                assert!((-1.0..=1.0).contains(&ab));
            }
        }
    }
    for name in ["age", "thalach", "chol", "num"] {
        assert_eq!(matrix.get(name, name), Some(1.0));
    }
}

#[test]
fn constant_columns_correlate_as_nan() {
    let matrix = correlation_matrix(&dataset());
    assert!(matrix.get("fbs", "age").unwrap().is_nan());
    assert!(matrix.get("fbs", "fbs").unwrap().is_nan());
}

#[test]
fn pairs_use_complete_rows_only() {
    let matrix = correlation_matrix(&dataset());
    // Without row 2: age = [40, 50, 70, 55], chol = [200, 260, 230, 210].
    let r = matrix.get("age", "chol").unwrap();
    let expected = heartstat_analysis::stats::pearson(
        &[40.0, 50.0, 70.0, 55.0],
        &[200.0, 260.0, 230.0, 210.0],
    );
    assert!((r - expected).abs() < 1e-12);
}

#[test]
fn target_ranking_is_by_absolute_value() {
    let matrix = correlation_matrix(&dataset());
    let ranked = target_correlations(&matrix, "num").unwrap();
    let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();

    assert_eq!(ranked.len(), matrix.len() - 1);
    assert!(!names.contains(&"num"));
    assert_eq!(names.last(), Some(&"fbs"), "NaN entries sort last");
    let finite: Vec<f64> = ranked
        .iter()
        .map(|(_, r)| *r)
        .filter(|r| r.is_finite())
        .collect();
    assert!(finite.windows(2).all(|w| w[0].abs() >= w[1].abs()));
    assert!(matrix.get("num", "thalach").unwrap() < 0.0);
}

#[test]
fn absent_target_is_column_missing() {
    let matrix = correlation_matrix(&dataset());
    assert_eq!(
        target_correlations(&matrix, "target"),
        Err(StatsError::column_missing("target"))
    );
    // Text columns are not part of the matrix.
    assert!(target_correlations(&matrix, "thal").is_err());
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(round_to(2.5, 0), 3.0);
    assert_eq!(round_to(-2.5, 0), -3.0);
    assert_eq!(round_to(0.12346, 4), 0.1235);
    assert_eq!(round_to(-0.4226, 3), -0.423);
    assert!(round_to(f64::NAN, 3).is_nan());
}
