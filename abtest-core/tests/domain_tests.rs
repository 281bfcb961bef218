use abtest_core::domain::*;
use abtest_core::CoreError;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ===== Group Tests =====

#[test]
fn test_group_parse_and_display() {
    assert_eq!("A".parse::<Group>().unwrap(), Group::A);
    assert_eq!(" B ".parse::<Group>().unwrap(), Group::B);
    assert_eq!(Group::A.to_string(), "A");
    assert_eq!(Group::B.other(), Group::A);
}

#[rstest]
#[case("a")]
#[case("C")]
#[case("")]
#[case("AB")]
fn test_group_rejects_unknown_labels(#[case] label: &str) {
    let err = label.parse::<Group>().unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
}

#[test]
fn test_group_serializes_as_letter() {
    let json = serde_json::to_string(&Record::new(Group::B, 1.5)).unwrap();
    assert_eq!(json, r#"{"group":"B","outcome":1.5}"#);
}

// ===== HypothesisType Tests =====

#[rstest]
#[case("One Tail", HypothesisType::OneTailed)]
#[case("one tail", HypothesisType::OneTailed)]
#[case("one-tailed", HypothesisType::OneTailed)]
#[case("one_tailed", HypothesisType::OneTailed)]
#[case("ONE", HypothesisType::OneTailed)]
#[case("Two Tails", HypothesisType::TwoTailed)]
#[case("two-tailed", HypothesisType::TwoTailed)]
#[case("  two  ", HypothesisType::TwoTailed)]
fn test_hypothesis_type_parse(#[case] input: &str, #[case] expected: HypothesisType) {
    assert_eq!(input.parse::<HypothesisType>().unwrap(), expected);
}

#[rstest]
#[case("three tails")]
#[case("")]
#[case("tail")]
fn test_hypothesis_type_rejects_unknown(#[case] input: &str) {
    let err = input.parse::<HypothesisType>().unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration(_)));
}

#[test]
fn test_hypothesis_type_labels() {
    assert_eq!(HypothesisType::OneTailed.to_string(), "One Tail");
    assert_eq!(HypothesisType::TwoTailed.to_string(), "Two Tails");
    assert_eq!(HypothesisType::default(), HypothesisType::TwoTailed);
}

#[test]
fn test_hypothesis_type_deserializes_labels() {
    let one: HypothesisType = serde_json::from_str("\"One Tail\"").unwrap();
    assert_eq!(one, HypothesisType::OneTailed);
    let two: HypothesisType = serde_json::from_str("\"two_tailed\"").unwrap();
    assert_eq!(two, HypothesisType::TwoTailed);

    assert_eq!(serde_json::to_string(&HypothesisType::OneTailed).unwrap(), "\"one_tailed\"");
    assert!(serde_json::from_str::<HypothesisType>("\"three tails\"").is_err());
}

// ===== Alternative Tests =====

#[test]
fn test_alternative_direction() {
    assert!(Alternative::Greater.agrees_with(2.0));
    assert!(!Alternative::Greater.agrees_with(-2.0));
    assert!(Alternative::Less.agrees_with(-0.1));
    assert!(!Alternative::Less.agrees_with(f64::INFINITY));
    assert_eq!("less".parse::<Alternative>().unwrap(), Alternative::Less);
    assert!("sideways".parse::<Alternative>().is_err());
}

// ===== TestConfiguration Tests =====

#[test]
fn test_configuration_default() {
    let config = TestConfiguration::default();
    assert_eq!(config.confidence_level, 0.95);
    assert_eq!(config.hypothesis_type, HypothesisType::TwoTailed);
    assert_eq!(config.alternative, None);
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(0.90, 0.1)]
#[case(0.5, 0.5)]
#[case(0.99, 0.01)]
fn test_significance_level(#[case] confidence: f64, #[case] alpha: f64) {
    let config = TestConfiguration::new(confidence, HypothesisType::TwoTailed).unwrap();
    assert!((config.significance_level() - alpha).abs() < 1e-12);
}

#[rstest]
#[case(1.5)]
#[case(-0.1)]
#[case(0.0)]
#[case(1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_configuration_rejects_out_of_range(#[case] confidence: f64) {
    let err = TestConfiguration::new(confidence, HypothesisType::OneTailed).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration(_)));
}

#[test]
fn test_configuration_with_alternative() {
    let config = TestConfiguration::new(0.9, HypothesisType::OneTailed)
        .unwrap()
        .with_alternative(Alternative::Greater);
    assert_eq!(config.alternative, Some(Alternative::Greater));
}

#[test]
fn test_configuration_deserializes_with_defaults() {
    let config: TestConfiguration = serde_json::from_str(r#"{"confidence_level":0.99}"#).unwrap();
    assert_eq!(config.confidence_level, 0.99);
    assert_eq!(config.hypothesis_type, HypothesisType::TwoTailed);
    assert_eq!(config.alternative, None);
}

#[rstest]
#[case("0.95", 0.95)]
#[case("95%", 0.95)]
#[case(" 90 % ", 0.90)]
#[case("99%", 0.99)]
fn test_parse_confidence_level(#[case] input: &str, #[case] expected: f64) {
    let level = parse_confidence_level(input).unwrap();
    assert!((level - expected).abs() < 1e-12);
}

#[rstest]
#[case("95")]
#[case("150%")]
#[case("abc")]
#[case("")]
fn test_parse_confidence_level_rejects(#[case] input: &str) {
    let err = parse_confidence_level(input).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration(_)));
}

// ===== Dataset Tests =====

#[test]
fn test_dataset_from_samples_orders_a_then_b() {
    let dataset = Dataset::from_samples(&[1.0, 2.0], &[3.0, 4.0, 5.0], DatasetSource::Inline);

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.count(Group::A), 2);
    assert_eq!(dataset.count(Group::B), 3);
    assert_eq!(dataset.records()[0], Record::new(Group::A, 1.0));
    assert_eq!(dataset.records()[2], Record::new(Group::B, 3.0));
}

#[test]
fn test_dataset_split_preserves_order() {
    let records = vec![
        Record::new(Group::B, 9.0),
        Record::new(Group::A, 1.0),
        Record::new(Group::B, 8.0),
        Record::new(Group::A, 2.0),
    ];
    let dataset = Dataset::new(records, DatasetSource::Inline);

    let (a, b) = dataset.split();
    assert_eq!(a, vec![1.0, 2.0]);
    assert_eq!(b, vec![9.0, 8.0]);
    assert_eq!(dataset.outcomes(Group::B), b);
}

#[test]
fn test_dataset_empty() {
    let dataset = Dataset::new(vec![], DatasetSource::Inline);
    assert!(dataset.is_empty());
    assert_eq!(dataset.split(), (vec![], vec![]));
    assert!(dataset.generation_parameters().is_none());
}

#[test]
fn test_dataset_generation_parameters() {
    let parameters = GenerationParameters {
        sample_size: 2,
        mean_a: 50.0,
        sd_a: 10.0,
        mean_b: 55.0,
        sd_b: 10.0,
        mean_scale: None,
    };
    let dataset = Dataset::from_samples(
        &[1.0, 2.0],
        &[3.0, 4.0],
        DatasetSource::Synthetic {
            generator: "fixed".to_string(),
            parameters,
            seed: Some(7),
        },
    );

    assert_eq!(dataset.generation_parameters(), Some(&parameters));
}

#[test]
fn test_dataset_source_serialization() {
    let source = DatasetSource::Upload {
        path: "data.csv".into(),
    };
    let json = serde_json::to_value(&source).unwrap();
    assert_eq!(json["kind"], "upload");
    assert_eq!(json["path"], "data.csv");
}

// ===== TestResult Tests =====

fn sample_result(p_value: f64, reject_null: bool) -> TestResult {
    TestResult {
        t_statistic: 2.5,
        p_value,
        reject_null,
        degrees_of_freedom: 10.0,
        mean_a: 5.0,
        mean_b: 4.0,
        mean_difference: 1.0,
        significance_level: 0.05,
        hypothesis_type: HypothesisType::TwoTailed,
        confidence_interval: Some((0.1, 1.9)),
        effect_size: 0.8,
    }
}

#[test]
fn test_result_interpretation() {
    let rejected = sample_result(0.0312, true);
    assert!(rejected.interpretation().contains("0.0312"));
    assert!(rejected.interpretation().contains("We can reject H0"));

    let kept = sample_result(0.2, false);
    assert!(kept.interpretation().contains("can not reject H0"));
    assert!((kept.confidence_level() - 0.95).abs() < 1e-12);
}

#[test]
fn test_infinite_statistic_serializes_as_null() {
    let mut result = sample_result(0.0, true);
    result.t_statistic = f64::INFINITY;
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["t_statistic"].is_null());
    assert_eq!(json["hypothesis_type"], "two_tailed");
}

// ===== SessionId Tests =====

#[test]
fn test_session_ids_are_unique() {
    assert_ne!(SessionId::new(), SessionId::new());
}

#[test]
fn test_session_id_serializes_as_bare_uuid() {
    let id = SessionId::new();
    let json = serde_json::to_string(&id).unwrap();

    assert_eq!(json, format!("\"{id}\""));
    assert_eq!(serde_json::from_str::<SessionId>(&json).unwrap(), id);
}
