//! Drawing bootstrap samples from a dataset
//!
//! Two schemes are supported:
//!
//! - **Flat**: `n` rows drawn uniformly with replacement from the whole dataset.
//!   Group proportions vary from sample to sample.
//! - **Grouped**: every group is resampled on its own, drawing as many rows as
//!   it has from its own members. Per-group sizes are preserved exactly.
//!
//! Randomness for replicate `i` of a run comes from [`replicate_rng`], which
//! keys a ChaCha stream off `(seed, i)`. No generator is shared between
//! replicates, so results do not depend on scheduling.

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use resample_core::{Dataset, Error, Result};
use serde::{Deserialize, Serialize};

/// Resampling scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResampleScheme {
    /// Row-level resampling over the whole dataset
    #[default]
    Flat,
    /// Per-group resampling keyed on the named group column
    Grouped {
        /// Name of the group key the dataset must carry
        key: String,
    },
}

impl ResampleScheme {
    /// Grouped scheme over the named group key
    pub fn grouped(key: impl Into<String>) -> Self {
        Self::Grouped { key: key.into() }
    }

    /// Short scheme name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped { .. } => "grouped",
        }
    }

    /// Check that the scheme can be applied to `dataset`
    pub fn validate_for(&self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Err(Error::empty_input("Resampling"));
        }
        match self {
            Self::Flat => Ok(()),
            Self::Grouped { key } => match dataset.group_key_name() {
                Some(name) if name == key => Ok(()),
                Some(name) => Err(Error::Configuration(format!(
                    "Grouped resampling on '{key}' but the dataset is grouped by '{name}'"
                ))),
                None => Err(Error::Configuration(format!(
                    "Grouped resampling on '{key}' but the dataset has no group key"
                ))),
            },
        }
    }
}

/// Independent random stream for one replicate of a run
pub fn replicate_rng(seed: u64, replicate: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(replicate as u64);
    rng
}

/// Produces bootstrap samples under a fixed scheme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resampler {
    scheme: ResampleScheme,
}

impl Resampler {
    /// Create a resampler for the given scheme
    pub fn new(scheme: ResampleScheme) -> Self {
        Self { scheme }
    }

    /// Flat resampler
    pub fn flat() -> Self {
        Self::new(ResampleScheme::Flat)
    }

    /// Grouped resampler over the named group key
    pub fn grouped(key: impl Into<String>) -> Self {
        Self::new(ResampleScheme::grouped(key))
    }

    /// The scheme in use
    pub fn scheme(&self) -> &ResampleScheme {
        &self.scheme
    }

    /// Draw the row indices of one sample
    ///
    /// Flat indices are in draw order. Grouped indices are concatenated per
    /// group, in the dataset's group order.
    pub fn resample_indices<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        self.scheme.validate_for(dataset)?;

        let indices = match &self.scheme {
            ResampleScheme::Flat => {
                let dist = Uniform::new(0, dataset.len());
                (0..dataset.len()).map(|_| dist.sample(rng)).collect()
            }
            ResampleScheme::Grouped { .. } => {
                let mut indices = Vec::with_capacity(dataset.len());
                for group in dataset.groups() {
                    let dist = Uniform::new(0, group.len());
                    indices.extend((0..group.len()).map(|_| group.members[dist.sample(rng)]));
                }
                indices
            }
        };
        Ok(indices)
    }

    /// Draw one sample
    pub fn resample<R: Rng + ?Sized>(&self, dataset: &Dataset, rng: &mut R) -> Result<Dataset> {
        let indices = self.resample_indices(dataset, rng)?;
        Ok(dataset.take(&indices))
    }
}
