use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

// ===== Hypothesis Type =====

/// Serialized as `one_tailed` / `two_tailed`; deserialization accepts every
/// form [`FromStr`] does, including the `"One Tail"` / `"Two Tails"` labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum HypothesisType {
    OneTailed,
    #[default]
    TwoTailed,
}

impl HypothesisType {
    pub fn label(&self) -> &'static str {
        match self {
            HypothesisType::OneTailed => "One Tail",
            HypothesisType::TwoTailed => "Two Tails",
        }
    }
}

impl fmt::Display for HypothesisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HypothesisType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "one tail" | "one tailed" | "one" => Ok(HypothesisType::OneTailed),
            "two tails" | "two tailed" | "two" => Ok(HypothesisType::TwoTailed),
            _ => Err(CoreError::InvalidConfiguration(format!(
                "unrecognized hypothesis type '{s}', expected 'One Tail' or 'Two Tails'"
            ))),
        }
    }
}

impl TryFrom<String> for HypothesisType {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

// ===== Directional Alternative =====

/// Direction of a one-tailed alternative hypothesis, stated for A relative to B.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Alternative {
    /// H1: mean(A) > mean(B)
    Greater,
    /// H1: mean(A) < mean(B)
    Less,
}

impl Alternative {
    /// Whether a t statistic of the given sign points in the hypothesized direction.
    pub fn agrees_with(&self, t_statistic: f64) -> bool {
        match self {
            Alternative::Greater => t_statistic >= 0.0,
            Alternative::Less => t_statistic <= 0.0,
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alternative::Greater => write!(f, "greater"),
            Alternative::Less => write!(f, "less"),
        }
    }
}

impl FromStr for Alternative {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "greater" | ">" => Ok(Alternative::Greater),
            "less" | "<" => Ok(Alternative::Less),
            _ => Err(CoreError::InvalidConfiguration(format!(
                "unrecognized alternative '{s}', expected 'greater' or 'less'"
            ))),
        }
    }
}

// ===== Test Configuration =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TestConfiguration {
    pub confidence_level: f64,
    #[serde(default)]
    pub hypothesis_type: HypothesisType,
    /// When set together with a one-tailed hypothesis, the p-value is taken
    /// from the tail matching this direction instead of always halving the
    /// two-tailed value.
    #[serde(default)]
    pub alternative: Option<Alternative>,
}

impl TestConfiguration {
    pub fn new(confidence_level: f64, hypothesis_type: HypothesisType) -> Result<Self> {
        let config = Self {
            confidence_level,
            hypothesis_type,
            alternative: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = Some(alternative);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_confidence_level(self.confidence_level)
    }

    /// α = 1 - confidence level
    pub fn significance_level(&self) -> f64 {
        1.0 - self.confidence_level
    }
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            hypothesis_type: HypothesisType::TwoTailed,
            alternative: None,
        }
    }
}

pub fn validate_confidence_level(confidence_level: f64) -> Result<()> {
    // NaN fails both comparisons
    if confidence_level > 0.0 && confidence_level < 1.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidConfiguration(format!(
            "confidence level must lie strictly between 0 and 1, got {confidence_level}"
        )))
    }
}

/// Parses a confidence level written either as a fraction (`0.95`) or as a
/// percentage (`95%`).
pub fn parse_confidence_level(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(pct) => (pct.trim(), 100.0),
        None => (trimmed, 1.0),
    };

    let value: f64 = number.parse().map_err(|_| {
        CoreError::InvalidConfiguration(format!("confidence level '{s}' is not a number"))
    })?;
    let level = value / scale;
    validate_confidence_level(level)?;
    Ok(level)
}
