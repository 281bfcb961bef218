use abtest_core::{CoreError, Dataset, DatasetSource, Group};
use abtest_metrics::{MetricAggregator, DEFAULT_HISTOGRAM_BINS};
use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

// ===== Summary Tests =====

#[test]
fn test_summarize_five_values() {
    let summary = MetricAggregator::summarize(&[5.0, 1.0, 4.0, 2.0, 3.0]).unwrap();

    assert_eq!(summary.count, 5);
    assert_relative_eq!(summary.mean, 3.0);
    assert_relative_eq!(summary.std_dev.unwrap(), 2.5_f64.sqrt(), max_relative = 1e-12);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.q25, 2.0);
    assert_eq!(summary.median, 3.0);
    assert_eq!(summary.q75, 4.0);
    assert_eq!(summary.max, 5.0);
}

#[test]
fn test_summarize_interpolates_quartiles() {
    let summary = MetricAggregator::summarize(&[10.0, 20.0, 30.0, 40.0]).unwrap();

    assert_relative_eq!(summary.q25, 17.5);
    assert_relative_eq!(summary.median, 25.0);
    assert_relative_eq!(summary.q75, 32.5);
}

#[test]
fn test_summarize_single_value() {
    let summary = MetricAggregator::summarize(&[7.5]).unwrap();

    assert_eq!(summary.count, 1);
    assert_eq!(summary.std_dev, None);
    assert_eq!(summary.min, 7.5);
    assert_eq!(summary.median, 7.5);
    assert_eq!(summary.max, 7.5);
}

#[test]
fn test_summarize_empty_sample() {
    let err = MetricAggregator::summarize(&[]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
}

#[test]
fn test_summarize_dataset_per_group() {
    let dataset = Dataset::from_samples(&[1.0, 2.0, 3.0], &[10.0, 30.0], DatasetSource::Inline);
    let summary = MetricAggregator::summarize_dataset(&dataset).unwrap();

    assert_eq!(summary.get(Group::A).count, 3);
    assert_relative_eq!(summary.get(Group::A).mean, 2.0);
    assert_eq!(summary.get(Group::B).count, 2);
    assert_relative_eq!(summary.get(Group::B).median, 20.0);
}

#[test]
fn test_summarize_dataset_missing_group() {
    let dataset = Dataset::from_samples(&[1.0, 2.0], &[], DatasetSource::Inline);
    let err = MetricAggregator::summarize_dataset(&dataset).unwrap_err();

    match err {
        CoreError::InvalidInput(message) => assert!(message.contains("group B")),
        other => panic!("unexpected error {other:?}"),
    }
}

// ===== Histogram Tests =====

#[test]
fn test_histogram_last_bin_is_closed() {
    let histogram = MetricAggregator::histogram(&[1.0, 2.0, 3.0, 4.0, 5.0], 4).unwrap();

    let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1, 1, 2]);
    assert_eq!(histogram.total_count, 5);
    assert_eq!(histogram.bins[0].lower_bound, 1.0);
    assert_eq!(histogram.bins[3].upper_bound, 5.0);
}

#[test]
fn test_histogram_density_integrates_to_one() {
    let values: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37).sin() * 12.0).collect();
    let histogram = MetricAggregator::histogram(&values, DEFAULT_HISTOGRAM_BINS).unwrap();

    assert_eq!(histogram.bins.len(), DEFAULT_HISTOGRAM_BINS);
    let area: f64 = histogram
        .bins
        .iter()
        .map(|b| b.density * (b.upper_bound - b.lower_bound))
        .sum();
    assert_relative_eq!(area, 1.0, epsilon = 1e-9);

    let frequency: f64 = histogram.bins.iter().map(|b| b.frequency).sum();
    assert_relative_eq!(frequency, 1.0, epsilon = 1e-9);
}

#[test]
fn test_histogram_constant_sample() {
    let histogram = MetricAggregator::histogram(&[2.0, 2.0, 2.0], 10).unwrap();

    assert_eq!(histogram.bins.len(), 1);
    assert_eq!(histogram.bins[0].lower_bound, 1.5);
    assert_eq!(histogram.bins[0].upper_bound, 2.5);
    assert_eq!(histogram.bins[0].count, 3);
    assert_relative_eq!(histogram.bins[0].density, 1.0);
}

#[test]
fn test_histogram_narrow_span_falls_back_to_single_bin() {
    let values = [1.0, 1.0 + f64::EPSILON];
    let histogram = MetricAggregator::histogram(&values, DEFAULT_HISTOGRAM_BINS).unwrap();

    assert_eq!(histogram.bins.len(), 1);
    assert_eq!(histogram.bins[0].count, 2);
    assert!(histogram.bins.iter().all(|b| b.density.is_finite()));
    let area: f64 = histogram
        .bins
        .iter()
        .map(|b| b.density * (b.upper_bound - b.lower_bound))
        .sum();
    assert_relative_eq!(area, 1.0, epsilon = 1e-9);
}

#[test]
fn test_shared_histograms_narrow_span_have_finite_density() {
    let histograms = MetricAggregator::shared_histograms(&[5.0, 5.0], &[5.0 + 4.0 * f64::EPSILON], 10).unwrap();

    assert_eq!(histograms.edges.len(), 2);
    assert!(histograms
        .group_a
        .bins
        .iter()
        .chain(&histograms.group_b.bins)
        .all(|b| b.density.is_finite()));
}

#[test]
fn test_histogram_rejects_bad_input() {
    let err = MetricAggregator::histogram(&[1.0, 2.0], 0).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration(_)));

    let err = MetricAggregator::histogram(&[], 10).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
}

#[test]
fn test_histogram_with_too_few_edges() {
    let histogram = MetricAggregator::histogram_with_edges(&[1.0, 2.0], &[0.0]);
    assert!(histogram.bins.is_empty());
    assert_eq!(histogram.total_count, 0);
}

#[test]
fn test_histogram_with_custom_edges_skips_outside_values() {
    let histogram = MetricAggregator::histogram_with_edges(&[-1.0, 0.5, 1.5, 9.0], &[0.0, 1.0, 2.0]);

    let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1]);
    assert_eq!(histogram.total_count, 4);
}

#[test]
fn test_shared_histograms_use_common_edges() {
    let histograms = MetricAggregator::shared_histograms(&[0.0, 1.0], &[2.0, 3.0, 4.0], 2).unwrap();

    assert_eq!(histograms.edges, vec![0.0, 2.0, 4.0]);
    let a: Vec<usize> = histograms.group_a.bins.iter().map(|b| b.count).collect();
    let b: Vec<usize> = histograms.group_b.bins.iter().map(|b| b.count).collect();
    assert_eq!(a, vec![2, 0]);
    assert_eq!(b, vec![0, 3]);
    assert_relative_eq!(histograms.group_a.bins[0].density, 0.5);
}
