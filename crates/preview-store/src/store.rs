//! Collection store over a key-value backend
//!
//! [`Store`] reads and writes whole collections. It performs no locking of
//! its own: callers that need read-modify-write atomicity serialize access
//! around it.

use crate::backend::Backend;
use crate::collection::Collection;
use crate::error::StoreError;
use preview_model::{
    Dataset, NinetyDayPlan, Project, ProjectId, RaciEntry, UseCase, UseCaseId, ValueRecord, Vision,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Visions keyed by project id
pub type VisionMap = BTreeMap<ProjectId, Vision>;
/// Use case lists keyed by project id
pub type UseCaseMap = BTreeMap<ProjectId, Vec<UseCase>>;
/// RACI entry lists keyed by project id
pub type RaciMap = BTreeMap<ProjectId, Vec<RaciEntry>>;
/// Value record lists keyed by project id
pub type ValueMap = BTreeMap<ProjectId, Vec<ValueRecord>>;
/// Plans keyed by use case id
pub type PlanMap = BTreeMap<UseCaseId, NinetyDayPlan>;

/// The six planning collections persisted in a [`Backend`]
#[derive(Debug)]
pub struct Store {
    backend: Box<dyn Backend>,
    seed: Dataset,
}

impl Store {
    /// Open a store seeded with [`Dataset::demo`]
    ///
    /// # Errors
    /// Returns the backend error if seeding a missing slot fails.
    pub fn open(backend: impl Backend + 'static) -> Result<Self, StoreError> {
        Self::with_seed(backend, Dataset::demo())
    }

    /// Open a store with a custom seed
    ///
    /// # Errors
    /// Returns the backend error if seeding a missing slot fails.
    pub fn with_seed(backend: impl Backend + 'static, seed: Dataset) -> Result<Self, StoreError> {
        let store = Self {
            backend: Box::new(backend),
            seed,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Seed every slot that is currently absent
    ///
    /// Present slots are left alone, even when empty.
    ///
    /// # Errors
    /// Returns the backend error of the first failing slot.
    pub fn initialize(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            if self.backend.get(&collection.slot())?.is_none() {
                tracing::debug!(%collection, "seeding empty slot");
                self.seed_slot(collection)?;
            }
        }
        Ok(())
    }

    /// Discard every slot and reseed
    ///
    /// # Errors
    /// Returns the backend error if clearing or seeding fails.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.backend.clear()?;
        self.initialize()?;
        tracing::info!("store reset to seed data");
        Ok(())
    }

    /// Whether the backend performs blocking I/O
    #[inline]
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.backend.blocking()
    }

    /// Decode a collection, `None` when its slot is absent
    ///
    /// # Errors
    /// - `StoreError::Corrupt` if the slot does not decode as `T`
    /// - any backend error
    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<T>, StoreError> {
        let slot = collection.slot();
        let Some(text) = self.backend.get(&slot)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { slot, source })
    }

    /// Encode and overwrite a collection
    ///
    /// # Errors
    /// - `StoreError::Encode` if `value` cannot be encoded
    /// - any backend error
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), StoreError> {
        let slot = collection.slot();
        let text = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            slot: slot.clone(),
            source,
        })?;
        self.backend.put(&slot, text)
    }

    fn load<T: DeserializeOwned + Default>(&self, collection: Collection) -> Result<T, StoreError> {
        Ok(self.read(collection)?.unwrap_or_default())
    }

    /// All projects
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn projects(&self) -> Result<Vec<Project>, StoreError> {
        self.load(Collection::Projects)
    }

    /// Overwrite the project list
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_projects(&self, projects: &[Project]) -> Result<(), StoreError> {
        self.write(Collection::Projects, projects)
    }

    /// All visions
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn visions(&self) -> Result<VisionMap, StoreError> {
        self.load(Collection::Visions)
    }

    /// Overwrite the vision map
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_visions(&self, visions: &VisionMap) -> Result<(), StoreError> {
        self.write(Collection::Visions, visions)
    }

    /// All use cases
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn use_cases(&self) -> Result<UseCaseMap, StoreError> {
        self.load(Collection::UseCases)
    }

    /// Overwrite the use case map
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_use_cases(&self, use_cases: &UseCaseMap) -> Result<(), StoreError> {
        self.write(Collection::UseCases, use_cases)
    }

    /// All RACI entries
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn raci(&self) -> Result<RaciMap, StoreError> {
        self.load(Collection::Raci)
    }

    /// Overwrite the RACI map
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_raci(&self, raci: &RaciMap) -> Result<(), StoreError> {
        self.write(Collection::Raci, raci)
    }

    /// All value records
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn values(&self) -> Result<ValueMap, StoreError> {
        self.load(Collection::Values)
    }

    /// Overwrite the value map
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_values(&self, values: &ValueMap) -> Result<(), StoreError> {
        self.write(Collection::Values, values)
    }

    /// All 90-day plans
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn plans(&self) -> Result<PlanMap, StoreError> {
        self.load(Collection::Plans)
    }

    /// Overwrite the plan map
    ///
    /// # Errors
    /// Returns the backend error, or `StoreError::Corrupt` / `StoreError::Encode` for bad slot content.
    pub fn save_plans(&self, plans: &PlanMap) -> Result<(), StoreError> {
        self.write(Collection::Plans, plans)
    }

    /// Read every collection
    ///
    /// # Errors
    /// Returns the first decode or backend error.
    pub fn snapshot(&self) -> Result<Dataset, StoreError> {
        Ok(Dataset {
            projects: self.projects()?,
            visions: self.visions()?,
            use_cases: self.use_cases()?,
            raci: self.raci()?,
            values: self.values()?,
            plans: self.plans()?,
        })
    }

    fn seed_slot(&self, collection: Collection) -> Result<(), StoreError> {
        let seed = &self.seed;
        match collection {
            Collection::Projects => self.write(collection, &seed.projects),
            Collection::Visions => self.write(collection, &seed.visions),
            Collection::UseCases => self.write(collection, &seed.use_cases),
            Collection::Raci => self.write(collection, &seed.raci),
            Collection::Values => self.write(collection, &seed.values),
            Collection::Plans => self.write(collection, &seed.plans),
        }
    }
}
