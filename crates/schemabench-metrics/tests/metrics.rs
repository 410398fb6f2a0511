use schemabench_metrics::{Metric, MetricOptions, evaluate_all, resolve_metrics};
use schemabench_model::{ColumnId, Correspondence, GoldenStandard, MatchSet};

fn pair(left: &str, right: &str) -> (ColumnId, ColumnId) {
    (
        ColumnId::new("source", left).expect("column id"),
        ColumnId::new("target", right).expect("column id"),
    )
}

fn fixture() -> (MatchSet, GoldenStandard) {
    // Inserted out of rank order; metrics must rank by score.
    let matches: MatchSet = [
        ("c", "c", "0.7"),
        ("d", "y", "0.1"),
        ("a", "a", "0.9"),
        ("b", "x", "0.8"),
    ]
    .into_iter()
    .map(|(left, right, score)| {
        let (source, target) = pair(left, right);
        Correspondence::new(source, target, score)
    })
    .collect();
    let golden = [pair("a", "a"), pair("c", "c"), pair("e", "e")]
        .into_iter()
        .collect();
    (matches, golden)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn precision_recall_and_f1() {
    let (matches, golden) = fixture();
    let options = MetricOptions::default();

    assert_close(Metric::Precision.evaluate(&matches, &golden, &options).unwrap(), 0.5);
    assert_close(Metric::Recall.evaluate(&matches, &golden, &options).unwrap(), 2.0 / 3.0);
    assert_close(
        Metric::F1Score.evaluate(&matches, &golden, &options).unwrap(),
        4.0 / 7.0,
    );
}

#[test]
fn precision_at_n_percent_uses_ranked_prefix() {
    let (matches, golden) = fixture();
    let at = |n: f64| {
        Metric::PrecisionAtNPercent
            .evaluate(&matches, &golden, &MetricOptions { n: Some(n) })
            .unwrap()
    };

    assert_close(at(25.0), 1.0);
    // ceil(0.3 * 4) = 2 matches kept.
    assert_close(at(30.0), 0.5);
    assert_close(at(75.0), 2.0 / 3.0);
    assert_close(at(100.0), 0.5);
}

#[test]
fn recall_at_sizeof_ground_truth_keeps_golden_size() {
    let (matches, golden) = fixture();
    let value = Metric::RecallAtSizeofGroundTruth
        .evaluate(&matches, &golden, &MetricOptions::default())
        .unwrap();
    assert_close(value, 2.0 / 3.0);
}

#[test]
fn evaluate_all_passes_options_to_every_metric() {
    let (matches, golden) = fixture();
    let metrics = resolve_metrics(&["precision", "precision_at_n_percent"]).unwrap();
    let results =
        evaluate_all(&metrics, &matches, &golden, &MetricOptions { n: Some(25.0) }).unwrap();

    assert_eq!(results.len(), 2);
    assert_close(results["precision"], 0.5);
    assert_close(results["precision_at_n_percent"], 1.0);
}

#[test]
fn resolve_metrics_fails_on_unknown_name() {
    assert!(resolve_metrics(&["precision", "accuracy"]).is_err());
}
