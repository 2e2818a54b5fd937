//! Role-conditioned status gate.
//!
//! There is no transition graph: any status may follow any other. What is
//! gated is who may change status, judged against the status the incident
//! holds before the change.

use crate::{IncidentStatus, Role};

/// Roles that may change status regardless of the current status.
pub const UNCONDITIONAL_STATUS_ROLES: &[Role] = &[Role::Supervisor, Role::Coordinator];

/// Status that a conditional role needs the incident to be in.
pub const CONDITIONAL_STATUS_REQUIREMENT: IncidentStatus = IncidentStatus::InProgress;

/// Outcome of the status gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGateDecision {
    /// The change may proceed.
    Allowed,
    /// The role lacks the `update_status` capability.
    MissingCapability,
    /// The role may only move incidents that are already in progress.
    RequiresInProgress {
        /// Status the incident currently holds.
        current: IncidentStatus,
    },
}

impl StatusGateDecision {
    /// Evaluates the gate.
    ///
    /// `holds_update_status` is the capability check for the acting role and
    /// `unconditional_role` whether the role belongs to
    /// [`UNCONDITIONAL_STATUS_ROLES`].
    #[must_use]
    pub fn evaluate(
        holds_update_status: bool,
        unconditional_role: bool,
        current: IncidentStatus,
    ) -> Self {
        if !holds_update_status {
            return Self::MissingCapability;
        }
        if unconditional_role || current == CONDITIONAL_STATUS_REQUIREMENT {
            return Self::Allowed;
        }

        Self::RequiresInProgress { current }
    }

    /// Returns whether the change may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::StatusGateDecision;
    use crate::IncidentStatus;

    #[test]
    fn unconditional_roles_pass_in_every_status() {
        for status in IncidentStatus::all() {
            assert!(StatusGateDecision::evaluate(true, true, *status).is_allowed());
        }
    }

    #[test]
    fn conditional_role_passes_only_in_progress() {
        assert!(StatusGateDecision::evaluate(true, false, IncidentStatus::InProgress).is_allowed());
        assert_eq!(
            StatusGateDecision::evaluate(true, false, IncidentStatus::Open),
            StatusGateDecision::RequiresInProgress {
                current: IncidentStatus::Open
            }
        );
        assert_eq!(
            StatusGateDecision::evaluate(true, false, IncidentStatus::Resolved),
            StatusGateDecision::RequiresInProgress {
                current: IncidentStatus::Resolved
            }
        );
    }

    #[test]
    fn missing_capability_wins_over_role() {
        assert_eq!(
            StatusGateDecision::evaluate(false, true, IncidentStatus::InProgress),
            StatusGateDecision::MissingCapability
        );
    }
}
