use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Label of one of the two compared variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::A, Group::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
        }
    }

    pub fn other(&self) -> Group {
        match self {
            Group::A => Group::B,
            Group::B => Group::A,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Group::A),
            "B" => Ok(Group::B),
            other => Err(CoreError::InvalidInput(format!(
                "unknown group label '{other}', expected 'A' or 'B'"
            ))),
        }
    }
}

/// A single observation: which group it belongs to and the measured outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub group: Group,
    pub outcome: f64,
}

impl Record {
    pub fn new(group: Group, outcome: f64) -> Self {
        Self { group, outcome }
    }
}
