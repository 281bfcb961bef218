use abtest_core::{
    CoreError, Group, HypothesisType, Result, TestConfiguration, TestResult,
};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Intermediate quantities of Welch's unequal-variance t-test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WelchStatistics {
    pub n_a: usize,
    pub n_b: usize,
    pub mean_a: f64,
    pub mean_b: f64,
    pub var_a: f64,
    pub var_b: f64,
    /// var_a/n_a + var_b/n_b
    pub squared_standard_error: f64,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
}

impl WelchStatistics {
    /// Both samples must already hold at least two finite values.
    pub fn compute(sample_a: &[f64], sample_b: &[f64]) -> Self {
        let n_a = sample_a.len();
        let n_b = sample_b.len();
        let (na, nb) = (n_a as f64, n_b as f64);

        let mean_a = sample_a.mean();
        let mean_b = sample_b.mean();
        let var_a = sample_a.variance();
        let var_b = sample_b.variance();

        let se_a = var_a / na;
        let se_b = var_b / nb;
        let squared_standard_error = se_a + se_b;
        let difference = mean_a - mean_b;

        let (t_statistic, degrees_of_freedom) = if squared_standard_error == 0.0 {
            // Both samples are constant: the statistic is 0 for equal means
            // and diverges otherwise.
            let t = if difference == 0.0 {
                0.0
            } else {
                f64::INFINITY.copysign(difference)
            };
            (t, na + nb - 2.0)
        } else {
            let t = difference / squared_standard_error.sqrt();
            let denominator = se_a.powi(2) / (na - 1.0) + se_b.powi(2) / (nb - 1.0);
            let df = if denominator > 0.0 {
                squared_standard_error.powi(2) / denominator
            } else {
                na + nb - 2.0
            };
            (t, df)
        };

        Self {
            n_a,
            n_b,
            mean_a,
            mean_b,
            var_a,
            var_b,
            squared_standard_error,
            t_statistic,
            degrees_of_freedom,
        }
    }

    pub fn mean_difference(&self) -> f64 {
        self.mean_a - self.mean_b
    }

    /// False when sums over the samples overflowed, leaving means or
    /// variances non-finite.
    pub fn is_representable(&self) -> bool {
        [self.mean_a, self.mean_b, self.squared_standard_error, self.degrees_of_freedom]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn is_degenerate(&self) -> bool {
        self.squared_standard_error == 0.0
    }

    /// P(|T| >= |t|) under H0 for Student's t with the Welch degrees of freedom.
    pub fn two_tailed_p_value(&self) -> Result<f64> {
        if self.t_statistic == 0.0 {
            return Ok(1.0);
        }
        if self.t_statistic.is_infinite() {
            return Ok(0.0);
        }

        let dist = self.t_distribution()?;
        Ok((2.0 * dist.sf(self.t_statistic.abs())).clamp(0.0, 1.0))
    }

    /// Two-sided interval for mean(A) - mean(B).
    pub fn confidence_interval(&self, confidence_level: f64) -> Option<(f64, f64)> {
        let difference = self.mean_difference();
        if self.is_degenerate() {
            return Some((difference, difference));
        }

        let dist = self.t_distribution().ok()?;
        let critical = dist.inverse_cdf((1.0 + confidence_level) / 2.0);
        let margin = critical * self.squared_standard_error.sqrt();
        Some((difference - margin, difference + margin))
    }

    fn t_distribution(&self) -> Result<StudentsT> {
        StudentsT::new(0.0, 1.0, self.degrees_of_freedom).map_err(|e| {
            CoreError::InvalidInput(format!(
                "cannot build t distribution with {} degrees of freedom: {e}",
                self.degrees_of_freedom
            ))
        })
    }
}

/// Two-sample hypothesis test on the difference of means, not assuming
/// equal variances (Welch's t-test).
#[derive(Debug, Clone, Copy)]
pub struct HypothesisTester {
    config: TestConfiguration,
}

impl HypothesisTester {
    pub fn new(config: TestConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TestConfiguration {
        &self.config
    }

    pub fn test(&self, group_a: &[f64], group_b: &[f64]) -> Result<TestResult> {
        validate_samples(group_a, group_b)?;

        let welch = WelchStatistics::compute(group_a, group_b);
        if !welch.is_representable() {
            return Err(CoreError::InvalidInput(
                "outcome values are too large for the test statistic to be computed in \
                 double precision; rescale the data"
                    .to_string(),
            ));
        }
        if welch.is_degenerate() {
            tracing::warn!(
                mean_a = welch.mean_a,
                mean_b = welch.mean_b,
                "Both samples have zero variance"
            );
        }

        let two_tailed = welch.two_tailed_p_value()?;
        let p_value = self.adjust_for_tails(two_tailed, welch.t_statistic);
        let significance_level = self.config.significance_level();
        let reject_null = p_value < significance_level;

        tracing::debug!(
            t = welch.t_statistic,
            df = welch.degrees_of_freedom,
            p = p_value,
            alpha = significance_level,
            reject_null,
            "Welch t-test computed"
        );

        Ok(TestResult {
            t_statistic: welch.t_statistic,
            p_value,
            reject_null,
            degrees_of_freedom: welch.degrees_of_freedom,
            mean_a: welch.mean_a,
            mean_b: welch.mean_b,
            mean_difference: welch.mean_difference(),
            significance_level,
            hypothesis_type: self.config.hypothesis_type,
            confidence_interval: welch.confidence_interval(self.config.confidence_level),
            effect_size: StatisticalAnalyzer::cohens_d(group_a, group_b),
        })
    }

    /// One-tailed tests halve the two-tailed p-value whatever the sign of the
    /// observed difference. With an explicit alternative the opposite tail
    /// yields `1 - p/2` instead.
    fn adjust_for_tails(&self, two_tailed: f64, t_statistic: f64) -> f64 {
        match (self.config.hypothesis_type, self.config.alternative) {
            (HypothesisType::TwoTailed, _) => two_tailed,
            (HypothesisType::OneTailed, None) => two_tailed / 2.0,
            (HypothesisType::OneTailed, Some(alternative)) => {
                if alternative.agrees_with(t_statistic) {
                    two_tailed / 2.0
                } else {
                    1.0 - two_tailed / 2.0
                }
            }
        }
    }
}

fn validate_samples(group_a: &[f64], group_b: &[f64]) -> Result<()> {
    let samples = [(Group::A, group_a), (Group::B, group_b)];

    for (group, sample) in samples {
        if sample.is_empty() {
            return Err(CoreError::InvalidInput(format!(
                "sample for group {group} is empty"
            )));
        }
    }

    for (group, sample) in samples {
        if let Some(index) = sample.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidInput(format!(
                "sample for group {group} has a non-numeric value at index {index}"
            )));
        }
    }

    for (group, sample) in samples {
        if sample.len() < 2 {
            return Err(CoreError::InsufficientSampleSize {
                group,
                count: sample.len(),
            });
        }
    }

    Ok(())
}

/// Run a Welch's t-test on two samples.
///
/// `p_value` is halved for [`HypothesisType::OneTailed`] and the null
/// hypothesis is rejected when it is strictly below `1 - confidence_level`.
pub fn perform_ab_test(
    group_a: &[f64],
    group_b: &[f64],
    confidence_level: f64,
    hypothesis_type: HypothesisType,
) -> Result<TestResult> {
    let config = TestConfiguration::new(confidence_level, hypothesis_type)?;
    HypothesisTester::new(config)?.test(group_a, group_b)
}

pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Calculate effect size (Cohen's d)
    pub fn cohens_d(sample1: &[f64], sample2: &[f64]) -> f64 {
        if sample1.len() < 2 || sample2.len() < 2 {
            return 0.0;
        }

        let mean1 = sample1.mean();
        let mean2 = sample2.mean();
        let var1 = sample1.variance();
        let var2 = sample2.variance();
        let n1 = sample1.len() as f64;
        let n2 = sample2.len() as f64;

        let pooled_std = (((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0)).sqrt();

        if pooled_std == 0.0 {
            return 0.0;
        }

        (mean1 - mean2) / pooled_std
    }
}
