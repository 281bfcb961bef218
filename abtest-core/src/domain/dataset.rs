use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::group::{Group, Record};

/// Distribution parameters used to draw a synthetic dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationParameters {
    pub sample_size: usize,
    pub mean_a: f64,
    pub sd_a: f64,
    pub mean_b: f64,
    pub sd_b: f64,
    /// Spread of the per-group means, only present for randomized draws.
    pub mean_scale: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    Upload {
        path: PathBuf,
    },
    Synthetic {
        generator: String,
        parameters: GenerationParameters,
        seed: Option<u64>,
    },
    Inline,
}

/// Two-group tabular data: an ordered list of (group, outcome) records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    pub source: DatasetSource,
    pub created_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, source: DatasetSource) -> Self {
        Self {
            records,
            source,
            created_at: Utc::now(),
        }
    }

    /// Build a dataset from two outcome samples, all of A followed by all of B.
    pub fn from_samples(group_a: &[f64], group_b: &[f64], source: DatasetSource) -> Self {
        let records = group_a
            .iter()
            .map(|&v| Record::new(Group::A, v))
            .chain(group_b.iter().map(|&v| Record::new(Group::B, v)))
            .collect();
        Self::new(records, source)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, group: Group) -> usize {
        self.records.iter().filter(|r| r.group == group).count()
    }

    pub fn outcomes(&self, group: Group) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.group == group)
            .map(|r| r.outcome)
            .collect()
    }

    /// Split into (A outcomes, B outcomes), preserving record order.
    pub fn split(&self) -> (Vec<f64>, Vec<f64>) {
        let mut a = Vec::new();
        let mut b = Vec::new();
        for record in &self.records {
            match record.group {
                Group::A => a.push(record.outcome),
                Group::B => b.push(record.outcome),
            }
        }
        (a, b)
    }

    pub fn generation_parameters(&self) -> Option<&GenerationParameters> {
        match &self.source {
            DatasetSource::Synthetic { parameters, .. } => Some(parameters),
            _ => None,
        }
    }
}
