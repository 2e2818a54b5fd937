//! Role to capability registry.
//!
//! The standard grants live in [`STANDARD_ROLE_GRANTS`] as plain data so the
//! table can be reviewed, or replaced wholesale through
//! [`RolePermissionSet::from_grants`], without touching decision logic.

use std::collections::{BTreeMap, BTreeSet};

use civicwatch_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{Capability, Role};

/// Standard capability grants per role.
pub const STANDARD_ROLE_GRANTS: &[(Role, &[Capability])] = &[
    (
        Role::Supervisor,
        &[
            Capability::ViewIncidents,
            Capability::CreateIncident,
            Capability::EditIncident,
            Capability::DeleteIncident,
            Capability::UpdateStatus,
            Capability::AssignHandler,
            Capability::AddNotes,
            Capability::ViewReports,
        ],
    ),
    (
        Role::Coordinator,
        &[
            Capability::ViewIncidents,
            Capability::EditIncident,
            Capability::UpdateStatus,
            Capability::AssignHandler,
            Capability::AddNotes,
            Capability::ViewReports,
        ],
    ),
    (
        Role::Handler,
        &[
            Capability::ViewIncidents,
            Capability::UpdateStatus,
            Capability::AddNotes,
        ],
    ),
];

type GrantMap = BTreeMap<Role, BTreeSet<Capability>>;

/// Validated mapping from every role to its capability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GrantMap", into = "GrantMap")]
pub struct RolePermissionSet {
    grants: GrantMap,
}

impl RolePermissionSet {
    /// Builds the registry from [`STANDARD_ROLE_GRANTS`].
    #[must_use]
    pub fn standard() -> Self {
        let grants = STANDARD_ROLE_GRANTS
            .iter()
            .map(|(role, capabilities)| (*role, capabilities.iter().copied().collect()))
            .collect();

        Self { grants }
    }

    /// Builds a registry from an explicit grant table.
    ///
    /// Every role needs an entry and the supervisor set must contain every
    /// other role's set.
    pub fn from_grants(grants: BTreeMap<Role, BTreeSet<Capability>>) -> AppResult<Self> {
        if let Some(missing) = Role::all().iter().find(|role| !grants.contains_key(role)) {
            return Err(AppError::Validation(format!(
                "role permission table is missing an entry for role '{missing}'"
            )));
        }

        let supervisor = grants.get(&Role::Supervisor).cloned().unwrap_or_default();
        for (role, capabilities) in &grants {
            if let Some(extra) = capabilities.difference(&supervisor).next() {
                return Err(AppError::Validation(format!(
                    "role '{role}' holds capability '{extra}' that supervisor lacks"
                )));
            }
        }

        Ok(Self { grants })
    }

    /// Returns the capabilities granted to a role.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> BTreeSet<Capability> {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Returns the capabilities granted to a role given as a transport value.
    pub fn permissions_for_value(&self, role: &str) -> AppResult<BTreeSet<Capability>> {
        let role = Role::from_transport(role)?;
        Ok(self.permissions_for(role))
    }

    /// Returns whether the role holds the capability.
    #[must_use]
    pub fn grants(&self, role: Role, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|capabilities| capabilities.contains(&capability))
    }
}

impl Default for RolePermissionSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<GrantMap> for RolePermissionSet {
    type Error = AppError;

    fn try_from(value: GrantMap) -> Result<Self, Self::Error> {
        Self::from_grants(value)
    }
}

impl From<RolePermissionSet> for GrantMap {
    fn from(value: RolePermissionSet) -> Self {
        value.grants
    }
}
