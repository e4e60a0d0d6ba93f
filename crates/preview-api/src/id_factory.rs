//! Id generation
//!
//! Ids are `PREFIX-YYYYMMDD-####` with a random sequence. A taken sequence is
//! skipped by probing forward, so generation always terminates and only fails
//! once all 10 000 sequences of the day are in use.

use crate::error::ApiError;
use chrono::NaiveDate;
use parking_lot::Mutex;
use preview_model::ids::SEQUENCE_SPACE;
use preview_model::IdPrefix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random id generator
#[derive(Debug)]
pub struct IdFactory {
    rng: Mutex<StdRng>,
}

impl IdFactory {
    /// Generator seeded from the operating system
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate an id not accepted by `taken`
    ///
    /// # Errors
    /// `ApiError::IdSpaceExhausted` if every sequence of `date` is taken.
    pub fn next_id(
        &self,
        prefix: IdPrefix,
        date: NaiveDate,
        taken: impl Fn(&str) -> bool,
    ) -> Result<String, ApiError> {
        let start = self.rng.lock().random_range(0..SEQUENCE_SPACE);
        (0..SEQUENCE_SPACE)
            .map(|step| prefix.format(date, (start + step) % SEQUENCE_SPACE))
            .find(|candidate| !taken(candidate))
            .ok_or(ApiError::IdSpaceExhausted { prefix, date })
    }
}

impl Default for IdFactory {
    fn default() -> Self {
        Self::from_entropy()
    }
}
