use abtest_core::{CoreError, Dataset, Result, SessionId, TestConfiguration, TestResult};
use chrono::{DateTime, Utc};

use crate::aggregators::{GroupSummary, MetricAggregator};
use crate::analysis::{analyze, AnalysisReport};
use crate::statistical::HypothesisTester;

/// Holds the dataset a user is currently working with. The statistical
/// functions never keep state of their own; callers pass the session around.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: SessionId,
    dataset: Option<Dataset>,
    pub updated_at: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            dataset: None,
            updated_at: Utc::now(),
        }
    }

    /// Replace the active dataset, returning the previous one.
    pub fn load(&mut self, dataset: Dataset) -> Option<Dataset> {
        tracing::debug!(session = %self.id, records = dataset.len(), "Session dataset replaced");
        self.updated_at = Utc::now();
        self.dataset.replace(dataset)
    }

    pub fn clear(&mut self) -> Option<Dataset> {
        self.updated_at = Utc::now();
        self.dataset.take()
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset.as_ref().ok_or_else(|| {
            CoreError::InvalidInput("no dataset loaded in this session".to_string())
        })
    }

    pub fn summarize(&self) -> Result<GroupSummary> {
        MetricAggregator::summarize_dataset(self.dataset()?)
    }

    pub fn run_test(&self, config: &TestConfiguration) -> Result<TestResult> {
        let (group_a, group_b) = self.dataset()?.split();
        HypothesisTester::new(*config)?.test(&group_a, &group_b)
    }

    pub fn analyze(&self, config: &TestConfiguration, bins: usize) -> Result<AnalysisReport> {
        analyze(self.dataset()?, config, bins)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
