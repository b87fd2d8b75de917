//! Liveness probing for the backing store.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::infra::AccountRepository;

/// Binary health verdict reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Probes the account store with a minimal round trip.
pub struct LivenessProbe {
    store: Arc<dyn AccountRepository>,
}

impl LivenessProbe {
    /// Create new liveness probe over an account store
    pub fn new(store: Arc<dyn AccountRepository>) -> Self {
        Self { store }
    }

    /// Report store reachability as data. This never returns an error;
    /// any fault below the store boundary maps to `Unhealthy`.
    pub async fn check(&self) -> HealthStatus {
        match self.store.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                tracing::warn!("Store liveness check failed: {:?}", e);
                HealthStatus::Unhealthy
            }
        }
    }
}
