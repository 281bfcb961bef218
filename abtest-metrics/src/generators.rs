use abtest_core::{
    CoreError, DataGenerator, Dataset, DatasetSource, GenerationParameters, Result,
};
use rand::distributions::Distribution;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use std::fmt;
use std::str::FromStr;

/// Group A ~ N(50, 10), group B ~ N(55, 10): a fixed, detectable effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGenerator {
    pub mean_a: f64,
    pub sd_a: f64,
    pub mean_b: f64,
    pub sd_b: f64,
}

impl FixedGenerator {
    pub const NAME: &'static str = "fixed";

    pub fn new(mean_a: f64, sd_a: f64, mean_b: f64, sd_b: f64) -> Self {
        Self {
            mean_a,
            sd_a,
            mean_b,
            sd_b,
        }
    }
}

impl Default for FixedGenerator {
    fn default() -> Self {
        Self::new(50.0, 10.0, 55.0, 10.0)
    }
}

impl DataGenerator for FixedGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn generate_with_rng(
        &self,
        sample_size: usize,
        seed: Option<u64>,
        rng: &mut dyn RngCore,
    ) -> Result<Dataset> {
        let parameters = GenerationParameters {
            sample_size,
            mean_a: self.mean_a,
            sd_a: self.sd_a,
            mean_b: self.mean_b,
            sd_b: self.sd_b,
            mean_scale: None,
        };
        draw_dataset(self.name(), parameters, seed, rng)
    }
}

/// Per-call random parameters: a mean spread drawn from {1..4}, each group
/// mean from N(50, spread) and each group standard deviation from {5..9}.
///
/// Effect sizes and variances change from one call to the next, and the two
/// means are sometimes practically equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomizedGenerator;

impl RandomizedGenerator {
    pub const NAME: &'static str = "randomized";
    pub const CENTER: f64 = 50.0;

    pub fn draw_parameters(
        &self,
        sample_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<GenerationParameters> {
        let mean_scale = f64::from(rng.gen_range(1u32..=4));
        let mean_dist = normal(Self::CENTER, mean_scale)?;
        let mean_a = mean_dist.sample(&mut *rng);
        let mean_b = mean_dist.sample(&mut *rng);

        let sd_a = f64::from(rng.gen_range(5u32..=9));
        let sd_b = f64::from(rng.gen_range(5u32..=9));

        Ok(GenerationParameters {
            sample_size,
            mean_a,
            sd_a,
            mean_b,
            sd_b,
            mean_scale: Some(mean_scale),
        })
    }
}

impl DataGenerator for RandomizedGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn generate_with_rng(
        &self,
        sample_size: usize,
        seed: Option<u64>,
        rng: &mut dyn RngCore,
    ) -> Result<Dataset> {
        ensure_sample_size(sample_size)?;
        let parameters = self.draw_parameters(sample_size, &mut *rng)?;
        draw_dataset(self.name(), parameters, seed, rng)
    }
}

/// Named choice between the generator variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorPolicy {
    Fixed,
    #[default]
    Randomized,
}

impl GeneratorPolicy {
    pub fn generator(&self) -> Box<dyn DataGenerator> {
        match self {
            GeneratorPolicy::Fixed => Box::new(FixedGenerator::default()),
            GeneratorPolicy::Randomized => Box::new(RandomizedGenerator),
        }
    }
}

impl fmt::Display for GeneratorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorPolicy::Fixed => f.write_str(FixedGenerator::NAME),
            GeneratorPolicy::Randomized => f.write_str(RandomizedGenerator::NAME),
        }
    }
}

impl FromStr for GeneratorPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(GeneratorPolicy::Fixed),
            "randomized" | "random" => Ok(GeneratorPolicy::Randomized),
            _ => Err(CoreError::InvalidConfiguration(format!(
                "unknown generator policy '{s}', expected 'fixed' or 'randomized'"
            ))),
        }
    }
}

/// Synthetic A/B dataset drawn with the randomized policy from the
/// thread-local random source.
pub fn generate_synthetic_ab_data(sample_size: usize) -> Result<Dataset> {
    RandomizedGenerator.generate(sample_size)
}

fn ensure_sample_size(sample_size: usize) -> Result<()> {
    if sample_size == 0 {
        return Err(CoreError::InvalidInput(
            "sample size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal> {
    Normal::new(mean, std_dev).map_err(|e| {
        CoreError::InvalidConfiguration(format!(
            "invalid normal distribution N({mean}, {std_dev}): {e}"
        ))
    })
}

fn draw_dataset(
    generator: &str,
    parameters: GenerationParameters,
    seed: Option<u64>,
    rng: &mut dyn RngCore,
) -> Result<Dataset> {
    ensure_sample_size(parameters.sample_size)?;

    let dist_a = normal(parameters.mean_a, parameters.sd_a)?;
    let dist_b = normal(parameters.mean_b, parameters.sd_b)?;

    let outcomes_a: Vec<f64> = (0..parameters.sample_size)
        .map(|_| dist_a.sample(&mut *rng))
        .collect();
    let outcomes_b: Vec<f64> = (0..parameters.sample_size)
        .map(|_| dist_b.sample(&mut *rng))
        .collect();

    tracing::info!(
        generator,
        sample_size = parameters.sample_size,
        mean_a = parameters.mean_a,
        mean_b = parameters.mean_b,
        sd_a = parameters.sd_a,
        sd_b = parameters.sd_b,
        "Synthetic dataset generated"
    );

    Ok(Dataset::from_samples(
        &outcomes_a,
        &outcomes_b,
        DatasetSource::Synthetic {
            generator: generator.to_string(),
            parameters,
            seed,
        },
    ))
}
