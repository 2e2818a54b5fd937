use std::fmt::{Display, Formatter};
use std::str::FromStr;

use civicwatch_core::AppError;
use serde::{Deserialize, Serialize};

/// Capabilities enforced by application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Allows listing and reading incidents.
    ViewIncidents,
    /// Allows reporting new incidents.
    CreateIncident,
    /// Allows editing descriptive incident fields and priority.
    EditIncident,
    /// Allows removing incidents.
    DeleteIncident,
    /// Allows changing incident status, subject to the status gate.
    UpdateStatus,
    /// Allows setting or clearing the incident assignee.
    AssignHandler,
    /// Allows appending notes to incidents.
    AddNotes,
    /// Allows reading aggregated incident reports.
    ViewReports,
}

impl Capability {
    /// Returns a stable transport value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewIncidents => "view_incidents",
            Self::CreateIncident => "create_incident",
            Self::EditIncident => "edit_incident",
            Self::DeleteIncident => "delete_incident",
            Self::UpdateStatus => "update_status",
            Self::AssignHandler => "assign_handler",
            Self::AddNotes => "add_notes",
            Self::ViewReports => "view_reports",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::ViewIncidents,
            Capability::CreateIncident,
            Capability::EditIncident,
            Capability::DeleteIncident,
            Capability::UpdateStatus,
            Capability::AssignHandler,
            Capability::AddNotes,
            Capability::ViewReports,
        ];

        ALL
    }

    /// Parses a transport value into a capability.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown capability value '{value}'")))
    }
}

impl Display for Capability {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Fixed operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full control over every incident.
    Supervisor,
    /// Dispatches and manages incidents.
    Coordinator,
    /// Works incidents in the field.
    Handler,
}

impl Role {
    /// Returns a stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supervisor => "supervisor",
            Self::Coordinator => "coordinator",
            Self::Handler => "handler",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Supervisor, Self::Coordinator, Self::Handler]
    }

    /// Returns the label shown to operators.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Supervisor => "Supervisor",
            Self::Coordinator => "Coordinator",
            Self::Handler => "Field handler",
        }
    }

    /// Returns a short explanation of what the role is for.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Supervisor => {
                "Manages the whole system with full rights to create, edit, delete and assign incidents"
            }
            Self::Coordinator => "Manages and dispatches incidents, assigning work to handlers",
            Self::Handler => "Works assigned incidents, updating progress and notes",
        }
    }

    /// Parses a transport value into a role.
    ///
    /// Values outside the enumeration are an integration error and yield
    /// [`AppError::UnknownRole`].
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "supervisor" => Ok(Self::Supervisor),
            "coordinator" => Ok(Self::Coordinator),
            "handler" => Ok(Self::Handler),
            _ => Err(AppError::UnknownRole(format!("unknown role value '{value}'"))),
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use civicwatch_core::AppError;

    use super::{Capability, Role};

    #[test]
    fn capability_roundtrip_transport_value() {
        for capability in Capability::all() {
            let restored = Capability::from_str(capability.as_str());
            assert!(matches!(restored, Ok(value) if value == *capability));
        }
    }

    #[test]
    fn unknown_capability_is_rejected() {
        let parsed = Capability::from_str("approve_budget");
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_role_is_reported_as_unknown_role() {
        let parsed = Role::from_transport("mayor");
        assert!(matches!(parsed, Err(AppError::UnknownRole(_))));
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert!(Role::from_str("Supervisor").is_err());
        assert!(matches!(Role::from_str("handler"), Ok(Role::Handler)));
    }
}
