use serde::{Deserialize, Serialize};

use super::config::HypothesisType;

/// Outcome of a two-sample hypothesis test.
///
/// `t_statistic` is infinite when both samples have zero variance but
/// different means; such values serialize to `null` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub reject_null: bool,
    pub degrees_of_freedom: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub mean_difference: f64,
    pub significance_level: f64,
    pub hypothesis_type: HypothesisType,
    /// Interval for mean(A) - mean(B) at the configured confidence level.
    pub confidence_interval: Option<(f64, f64)>,
    /// Cohen's d using the pooled standard deviation.
    pub effect_size: f64,
}

impl TestResult {
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.significance_level
    }

    /// Plain-language reading of the decision.
    pub fn interpretation(&self) -> String {
        if self.reject_null {
            format!(
                "P-value {:.4} is less than {:.2} (significance level). We can reject H0: \
                 with the data provided the difference between groups is statistically \
                 significant and not caused by chance.",
                self.p_value, self.significance_level
            )
        } else {
            format!(
                "P-value {:.4} is not less than {:.2} (significance level). We can not \
                 reject H0: the difference between groups is not statistically significant.",
                self.p_value, self.significance_level
            )
        }
    }
}
