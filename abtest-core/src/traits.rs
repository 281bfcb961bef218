use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::domain::Dataset;
use crate::error::Result;

/// A policy for drawing synthetic two-group datasets.
///
/// Implementors only provide [`DataGenerator::generate_with_rng`]; the
/// unseeded and seeded entry points are derived from it.
pub trait DataGenerator {
    /// Stable name recorded in the dataset's provenance.
    fn name(&self) -> &'static str;

    fn generate_with_rng(
        &self,
        sample_size: usize,
        seed: Option<u64>,
        rng: &mut dyn RngCore,
    ) -> Result<Dataset>;

    /// Draw from the thread-local, OS-seeded random source.
    fn generate(&self, sample_size: usize) -> Result<Dataset> {
        self.generate_with_rng(sample_size, None, &mut rand::thread_rng())
    }

    /// Reproducible draw for a fixed seed.
    fn generate_seeded(&self, sample_size: usize, seed: u64) -> Result<Dataset> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(sample_size, Some(seed), &mut rng)
    }
}
