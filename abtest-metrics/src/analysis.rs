use abtest_core::{Dataset, Group, Result, TestConfiguration, TestResult};
use serde::{Deserialize, Serialize};

use crate::aggregators::{GroupHistograms, GroupSummary, MetricAggregator};
use crate::statistical::HypothesisTester;

/// Everything needed to present one A/B comparison: per-group summaries,
/// distribution data and the test decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub configuration: TestConfiguration,
    pub summary: GroupSummary,
    pub histograms: GroupHistograms,
    pub result: TestResult,
}

impl AnalysisReport {
    pub fn interpretation(&self) -> String {
        self.result.interpretation()
    }
}

pub fn analyze(
    dataset: &Dataset,
    config: &TestConfiguration,
    bins: usize,
) -> Result<AnalysisReport> {
    let tester = HypothesisTester::new(*config)?;
    let (group_a, group_b) = dataset.split();

    let result = tester.test(&group_a, &group_b)?;
    let summary = MetricAggregator::summarize_dataset(dataset)?;
    let histograms = MetricAggregator::shared_histograms(&group_a, &group_b, bins)?;

    tracing::info!(
        records = dataset.len(),
        group_a = dataset.count(Group::A),
        group_b = dataset.count(Group::B),
        reject_null = result.reject_null,
        "Analysis complete"
    );

    Ok(AnalysisReport {
        configuration: *config,
        summary,
        histograms,
        result,
    })
}
