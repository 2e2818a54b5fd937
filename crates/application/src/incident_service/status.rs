use super::*;

impl IncidentService {
    /// Changes the status of an incident.
    ///
    /// Supervisors and coordinators may move an incident between any two
    /// statuses. Handlers may only move incidents that are currently
    /// `in-progress`. The gate looks at the status before the change.
    pub async fn update_status(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
        status: IncidentStatus,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::UpdateStatus)?;

        let mut incident = self.load_incident(incident_id).await?;
        let previous = incident.status();

        match self.status_gate(actor, previous) {
            StatusGateDecision::Allowed => {}
            StatusGateDecision::MissingCapability => {
                return Err(AppError::Denied(format!(
                    "role '{}' is missing capability '{}'",
                    actor.role(),
                    Capability::UpdateStatus
                )));
            }
            StatusGateDecision::RequiresInProgress { current } => {
                debug!(
                    incident_id = %incident_id,
                    subject = %actor.subject(),
                    role = %actor.role(),
                    current = %current,
                    requested = %status,
                    "status change denied by gate"
                );
                return Err(AppError::Denied(format!(
                    "role '{}' may only change status of in-progress incidents; incident '{incident_id}' is '{current}'",
                    actor.role()
                )));
            }
        }

        let expected_version = incident.version();
        incident.set_status(status);
        self.store_revision(&incident, expected_version).await?;

        info!(
            incident_id = %incident_id,
            subject = %actor.subject(),
            from = %previous,
            to = %status,
            "incident status changed"
        );
        Ok(incident)
    }

    /// Evaluates the status gate for the actor against the current status.
    #[must_use]
    pub fn status_gate(&self, actor: &UserIdentity, current: IncidentStatus) -> StatusGateDecision {
        StatusGateDecision::evaluate(
            self.authorization_service
                .can_perform(actor.role(), Capability::UpdateStatus),
            self.authorization_service
                .can_perform_as_any_of(actor.role(), UNCONDITIONAL_STATUS_ROLES),
            current,
        )
    }
}
