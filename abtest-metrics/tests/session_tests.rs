use abtest_core::csv_io::sample_dataset;
use abtest_core::{CoreError, Dataset, DatasetSource, Group, HypothesisType, TestConfiguration};
use abtest_metrics::{analyze, AnalysisSession, DEFAULT_HISTOGRAM_BINS};
use pretty_assertions::assert_eq;

#[test]
fn test_new_session_is_empty() {
    let session = AnalysisSession::new();

    assert!(!session.has_dataset());
    let err = session.run_test(&TestConfiguration::default()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert!(session.summarize().is_err());
}

#[test]
fn test_sessions_are_independent() {
    let mut first = AnalysisSession::new();
    let second = AnalysisSession::default();
    first.load(sample_dataset().unwrap());

    assert_ne!(first.id, second.id);
    assert!(first.has_dataset());
    assert!(!second.has_dataset());
}

#[test]
fn test_load_replaces_previous_dataset() {
    let mut session = AnalysisSession::new();
    let original = Dataset::from_samples(&[1.0, 2.0], &[3.0, 4.0], DatasetSource::Inline);
    assert!(session.load(original.clone()).is_none());

    let previous = session.load(sample_dataset().unwrap()).unwrap();
    assert_eq!(previous.records(), original.records());
    assert_eq!(session.dataset().unwrap().len(), 10);

    let cleared = session.clear();
    assert!(cleared.is_some());
    assert!(!session.has_dataset());
}

#[test]
fn test_session_runs_test_on_loaded_data() {
    let mut session = AnalysisSession::new();
    session.load(sample_dataset().unwrap());

    let result = session.run_test(&TestConfiguration::default()).unwrap();
    assert!(result.reject_null);
    assert!(result.mean_a < result.mean_b);

    let strict = TestConfiguration::new(0.99, HypothesisType::TwoTailed).unwrap();
    assert!(!session.run_test(&strict).unwrap().reject_null);
}

#[test]
fn test_session_summary() {
    let mut session = AnalysisSession::new();
    session.load(sample_dataset().unwrap());

    let summary = session.summarize().unwrap();
    assert_eq!(summary.get(Group::A).count, 5);
    assert_eq!(summary.get(Group::B).min, 53.8);
    assert_eq!(summary.get(Group::B).max, 58.9);
}

#[test]
fn test_analyze_combines_all_parts() {
    let mut session = AnalysisSession::new();
    session.load(sample_dataset().unwrap());
    let config = TestConfiguration::new(0.9, HypothesisType::OneTailed).unwrap();

    let report = session.analyze(&config, 5).unwrap();
    assert_eq!(report.configuration, config);
    assert_eq!(report.histograms.edges.len(), 6);
    assert_eq!(report.histograms.group_a.total_count, 5);
    assert_eq!(report.summary.group_b.count, 5);
    assert_eq!(report.interpretation(), report.result.interpretation());
    assert_eq!(report, analyze(session.dataset().unwrap(), &config, 5).unwrap());
}

#[test]
fn test_analyze_propagates_test_errors() {
    let dataset = Dataset::from_samples(&[1.0], &[2.0, 3.0], DatasetSource::Inline);
    let err = analyze(&dataset, &TestConfiguration::default(), DEFAULT_HISTOGRAM_BINS).unwrap_err();
    assert!(matches!(err, CoreError::InsufficientSampleSize { group: Group::A, count: 1 }));
}
