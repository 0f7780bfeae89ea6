//! Trip persistence port

use async_trait::async_trait;
use domain::entities::{Trip, TripDraft};
use domain::value_objects::Cep;
#[cfg(any(test, feature = "test-support"))]
use mockall::automock;

use crate::error::ApplicationError;

/// Partial update for a stored trip. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripPatch {
    /// New display name
    pub nome: Option<String>,
    /// New origin postal code
    pub origem_cep: Option<Cep>,
    /// New destination postal code
    pub destino_cep: Option<Cep>,
}

impl TripPatch {
    /// Whether the patch changes anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.origem_cep.is_none() && self.destino_cep.is_none()
    }
}

/// Port for trip storage. Every mutation commits as a single unit before
/// the call returns.
#[cfg_attr(any(test, feature = "test-support"), automock)]
#[async_trait]
pub trait TripStorePort: Send + Sync {
    /// Persist a new trip, returning it with its assigned id
    async fn insert(&self, draft: &TripDraft) -> Result<Trip, ApplicationError>;

    /// All stored trips
    async fn list(&self) -> Result<Vec<Trip>, ApplicationError>;

    /// Fetch a trip by id
    async fn get(&self, id: i64) -> Result<Option<Trip>, ApplicationError>;

    /// Apply a partial update; `None` when the trip does not exist
    async fn update(&self, id: i64, patch: &TripPatch) -> Result<Option<Trip>, ApplicationError>;

    /// Delete a trip; `false` when it did not exist
    async fn delete(&self, id: i64) -> Result<bool, ApplicationError>;

    /// Persist a computed distance; `None` when the trip does not exist
    async fn set_distance(&self, id: i64, km: f64) -> Result<Option<Trip>, ApplicationError>;
}
