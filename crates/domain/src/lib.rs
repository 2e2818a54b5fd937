//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod identity;
mod incident;
mod lifecycle;
mod role_permissions;
mod security;

pub use identity::UserIdentity;
pub use incident::{
    Coordinates, Incident, IncidentDraft, IncidentEdit, IncidentId, IncidentPriority,
    IncidentStatus, StoredIncident,
};
pub use lifecycle::{
    CONDITIONAL_STATUS_REQUIREMENT, StatusGateDecision, UNCONDITIONAL_STATUS_ROLES,
};
pub use role_permissions::{RolePermissionSet, STANDARD_ROLE_GRANTS};
pub use security::{Capability, Role};
