//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod health;
mod provisioning;

pub use health::{HealthStatus, LivenessProbe};
pub use provisioning::{Provisioner, ProvisioningService};
