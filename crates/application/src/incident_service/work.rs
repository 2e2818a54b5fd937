use super::*;

impl IncidentService {
    /// Appends a note to an incident.
    ///
    /// Only the capability is checked; notes are accepted in every status.
    pub async fn add_note(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
        text: impl Into<String>,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::AddNotes)?;

        let mut incident = self.load_incident(incident_id).await?;
        let expected_version = incident.version();
        incident.append_note(text)?;
        self.store_revision(&incident, expected_version).await?;

        info!(
            incident_id = %incident_id,
            subject = %actor.subject(),
            notes = incident.notes().len(),
            "incident note added"
        );
        Ok(incident)
    }

    /// Sets or clears the assignee. The status is left unchanged.
    pub async fn assign_handler(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
        assignee: Option<String>,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::AssignHandler)?;

        let mut incident = self.load_incident(incident_id).await?;
        let expected_version = incident.version();
        incident.set_assignee(assignee);
        self.store_revision(&incident, expected_version).await?;

        info!(
            incident_id = %incident_id,
            subject = %actor.subject(),
            assignee = incident.assignee().unwrap_or("-"),
            "incident assignee changed"
        );
        Ok(incident)
    }
}
