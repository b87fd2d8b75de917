//! Application state - Dependency injection container.
//!
//! Provides centralized access to the application services.

use std::sync::Arc;

use crate::infra::{AccountStore, Database};
use crate::services::{LivenessProbe, Provisioner, ProvisioningService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Account provisioning service
    pub provisioning: Arc<dyn ProvisioningService>,
    /// Store liveness probe
    pub liveness: Arc<LivenessProbe>,
}

impl AppState {
    /// Create application state from a database connection.
    ///
    /// Wires the account store into the provisioning service and the
    /// liveness probe.
    pub fn from_database(database: &Database) -> Self {
        let store = Arc::new(AccountStore::new(database.get_connection()));

        Self {
            provisioning: Arc::new(Provisioner::new(store.clone())),
            liveness: Arc::new(LivenessProbe::new(store)),
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(provisioning: Arc<dyn ProvisioningService>, liveness: Arc<LivenessProbe>) -> Self {
        Self {
            provisioning,
            liveness,
        }
    }
}
