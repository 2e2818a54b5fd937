use std::collections::BTreeSet;

use civicwatch_domain::{Capability, Role, UserIdentity};
use serde::Serialize;
use ts_rs::TS;

/// One entry of the role catalog.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-catalog-entry-response.ts"
)]
pub struct RoleCatalogEntryResponse {
    pub role: String,
    pub display_name: String,
    pub description: String,
    pub capabilities: Vec<String>,
}

/// Capability set granted to a single role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role: String,
    pub capabilities: Vec<String>,
}

/// Identity resolved for the current request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/current-identity-response.ts"
)]
pub struct CurrentIdentityResponse {
    pub subject: String,
    pub display_name: String,
    pub role: String,
    pub capabilities: Vec<String>,
}

/// Result of a guard check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/capability-check-response.ts"
)]
pub struct CapabilityCheckResponse {
    pub allowed: bool,
}

fn capability_names(capabilities: BTreeSet<Capability>) -> Vec<String> {
    capabilities
        .into_iter()
        .map(|capability| capability.as_str().to_owned())
        .collect()
}

impl RoleCatalogEntryResponse {
    pub fn new(role: Role, capabilities: BTreeSet<Capability>) -> Self {
        Self {
            role: role.as_str().to_owned(),
            display_name: role.display_name().to_owned(),
            description: role.description().to_owned(),
            capabilities: capability_names(capabilities),
        }
    }
}

impl RolePermissionsResponse {
    pub fn new(role: Role, capabilities: BTreeSet<Capability>) -> Self {
        Self {
            role: role.as_str().to_owned(),
            capabilities: capability_names(capabilities),
        }
    }
}

impl CurrentIdentityResponse {
    pub fn new(identity: &UserIdentity, capabilities: BTreeSet<Capability>) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            display_name: identity.display_name().to_owned(),
            role: identity.role().as_str().to_owned(),
            capabilities: capability_names(capabilities),
        }
    }
}
