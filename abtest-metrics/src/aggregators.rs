use abtest_core::{CoreError, Dataset, Group, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::cmp::Ordering;

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Descriptive statistics of one sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); undefined for a single value.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub group_a: SummaryStatistics,
    pub group_b: SummaryStatistics,
}

impl GroupSummary {
    pub fn get(&self, group: Group) -> &SummaryStatistics {
        match group {
            Group::A => &self.group_a,
            Group::B => &self.group_b,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    pub frequency: f64,
    /// count / (total * width); integrates to 1 over the histogram.
    pub density: f64,
}

/// Histograms of both groups over the same bin edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupHistograms {
    pub edges: Vec<f64>,
    pub group_a: Histogram,
    pub group_b: Histogram,
}

pub struct MetricAggregator;

impl MetricAggregator {
    pub fn summarize(values: &[f64]) -> Result<SummaryStatistics> {
        if values.is_empty() {
            return Err(CoreError::InvalidInput(
                "cannot summarize an empty sample".to_string(),
            ));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let std_dev = (values.len() > 1).then(|| values.std_dev());

        Ok(SummaryStatistics {
            count: values.len(),
            mean: values.mean(),
            std_dev,
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[sorted.len() - 1],
        })
    }

    pub fn summarize_dataset(dataset: &Dataset) -> Result<GroupSummary> {
        let (a, b) = dataset.split();
        Ok(GroupSummary {
            group_a: Self::summarize(&a).map_err(|_| empty_group(Group::A))?,
            group_b: Self::summarize(&b).map_err(|_| empty_group(Group::B))?,
        })
    }

    /// Evenly spaced edges spanning all given values. A constant sample, or one
    /// whose span is too narrow for distinct edges, gets a single unit-width
    /// bin around its values.
    pub fn bin_edges(values: &[f64], num_bins: usize) -> Result<Vec<f64>> {
        if num_bins == 0 {
            return Err(CoreError::InvalidConfiguration(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if values.is_empty() {
            return Err(CoreError::InvalidInput(
                "cannot build a histogram of an empty sample".to_string(),
            ));
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let unit_bin = vec![min - 0.5, max + 0.5];
        if min == max {
            return Ok(unit_bin);
        }

        let bin_width = (max - min) / num_bins as f64;
        let mut edges: Vec<f64> = (0..num_bins).map(|i| min + i as f64 * bin_width).collect();
        edges.push(max);

        // zero-width bins would carry an undefined density
        if edges
            .windows(2)
            .any(|pair| pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less))
        {
            return Ok(unit_bin);
        }
        Ok(edges)
    }

    /// Generate histogram with specified number of bins
    pub fn histogram(values: &[f64], num_bins: usize) -> Result<Histogram> {
        let edges = Self::bin_edges(values, num_bins)?;
        Ok(Self::histogram_with_edges(values, &edges))
    }

    /// Generate histogram with custom bin edges. Bins are half-open except the
    /// last, which also includes its upper edge.
    pub fn histogram_with_edges(values: &[f64], bin_edges: &[f64]) -> Histogram {
        if bin_edges.len() < 2 {
            return Histogram {
                bins: vec![],
                total_count: 0,
            };
        }

        let num_bins = bin_edges.len() - 1;
        let mut bins = vec![0usize; num_bins];

        for &value in values {
            for i in 0..num_bins {
                if value >= bin_edges[i] && value < bin_edges[i + 1] {
                    bins[i] += 1;
                    break;
                } else if i == num_bins - 1 && value == bin_edges[i + 1] {
                    bins[i] += 1;
                    break;
                }
            }
        }

        let total = values.len();
        let histogram_bins: Vec<HistogramBin> = bins
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower_bound = bin_edges[i];
                let upper_bound = bin_edges[i + 1];
                let width = upper_bound - lower_bound;
                let (frequency, density) = if total == 0 {
                    (0.0, 0.0)
                } else {
                    let frequency = count as f64 / total as f64;
                    (frequency, frequency / width)
                };
                HistogramBin {
                    lower_bound,
                    upper_bound,
                    count,
                    frequency,
                    density,
                }
            })
            .collect();

        Histogram {
            bins: histogram_bins,
            total_count: total,
        }
    }

    pub fn shared_histograms(
        group_a: &[f64],
        group_b: &[f64],
        num_bins: usize,
    ) -> Result<GroupHistograms> {
        let combined: Vec<f64> = group_a.iter().chain(group_b).copied().collect();
        let edges = Self::bin_edges(&combined, num_bins)?;

        Ok(GroupHistograms {
            group_a: Self::histogram_with_edges(group_a, &edges),
            group_b: Self::histogram_with_edges(group_b, &edges),
            edges,
        })
    }

    /// Quantile with linear interpolation between the closest ranks.
    fn percentile(sorted_values: &[f64], percentile: f64) -> f64 {
        if sorted_values.is_empty() {
            return 0.0;
        }
        let position = percentile / 100.0 * (sorted_values.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        let fraction = position - lower as f64;
        sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
    }
}

fn empty_group(group: Group) -> CoreError {
    CoreError::InvalidInput(format!("dataset has no records for group {group}"))
}
