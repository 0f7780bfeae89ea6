//! Inter-service distance port
//!
//! The trip service does not compute distances itself; it asks the
//! distance service over the network.

use async_trait::async_trait;
use domain::value_objects::Cep;
#[cfg(any(test, feature = "test-support"))]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the remote distance computation between two postal codes.
///
/// A single call with a fixed timeout; unlike the provider lookup this
/// call is not retried, the caller decides what to do with a failure.
#[cfg_attr(any(test, feature = "test-support"), automock)]
#[async_trait]
pub trait DistancePort: Send + Sync {
    /// Distance in kilometers between two postal codes
    async fn distance_by_ceps(
        &self,
        origem: &Cep,
        destino: &Cep,
    ) -> Result<f64, ApplicationError>;
}
