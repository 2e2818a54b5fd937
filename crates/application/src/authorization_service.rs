use std::collections::BTreeSet;
use std::sync::Arc;

use civicwatch_core::{AppError, AppResult};
use civicwatch_domain::{Capability, Role, RolePermissionSet, UserIdentity};
use tracing::debug;

/// Application service for role based authorization checks.
///
/// Decisions are pure lookups against the configured [`RolePermissionSet`].
#[derive(Clone)]
pub struct AuthorizationService {
    registry: Arc<RolePermissionSet>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a permission table.
    #[must_use]
    pub fn new(registry: RolePermissionSet) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Lists the capabilities held by a role.
    #[must_use]
    pub fn list_permissions(&self, role: Role) -> BTreeSet<Capability> {
        self.registry.permissions_for(role)
    }

    /// Lists the capabilities held by a role given as a transport value.
    pub fn list_permissions_for_value(&self, role: &str) -> AppResult<BTreeSet<Capability>> {
        self.registry.permissions_for_value(role)
    }

    /// Returns whether the role holds the capability.
    #[must_use]
    pub fn can_perform(&self, role: Role, capability: Capability) -> bool {
        self.registry.grants(role, capability)
    }

    /// Returns whether a raw role value holds the capability.
    ///
    /// Absent or unrecognized roles are denied rather than reported.
    #[must_use]
    pub fn can_perform_value(&self, role: Option<&str>, capability: Capability) -> bool {
        role.and_then(|value| Role::from_transport(value).ok())
            .is_some_and(|role| self.can_perform(role, capability))
    }

    /// Returns whether the role is one of the acceptable roles.
    #[must_use]
    pub fn can_perform_as_any_of(&self, role: Role, acceptable_roles: &[Role]) -> bool {
        acceptable_roles.contains(&role)
    }

    /// Ensures the actor holds the capability.
    pub fn require_capability(&self, actor: &UserIdentity, capability: Capability) -> AppResult<()> {
        if self.can_perform(actor.role(), capability) {
            return Ok(());
        }

        debug!(
            subject = %actor.subject(),
            role = %actor.role(),
            capability = %capability,
            "capability check denied"
        );
        Err(AppError::Denied(format!(
            "role '{}' is missing capability '{}'",
            actor.role(),
            capability
        )))
    }
}

impl Default for AuthorizationService {
    fn default() -> Self {
        Self::new(RolePermissionSet::standard())
    }
}
