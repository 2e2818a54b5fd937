use super::*;

impl IncidentService {
    /// Reports a new incident in the `open` state.
    pub async fn create_incident(
        &self,
        actor: &UserIdentity,
        draft: IncidentDraft,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::CreateIncident)?;

        let incident = Incident::report(draft, Utc::now())?;
        self.repository.insert_incident(incident.clone()).await?;

        info!(
            incident_id = %incident.id(),
            subject = %actor.subject(),
            priority = incident.priority().as_str(),
            "incident reported"
        );
        Ok(incident)
    }

    /// Replaces the descriptive fields and priority of an incident.
    pub async fn edit_incident(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
        edit: IncidentEdit,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::EditIncident)?;

        let mut incident = self.load_incident(incident_id).await?;
        let expected_version = incident.version();
        incident.apply_edit(edit)?;
        self.store_revision(&incident, expected_version).await?;

        info!(
            incident_id = %incident_id,
            subject = %actor.subject(),
            version = incident.version(),
            "incident edited"
        );
        Ok(incident)
    }

    /// Removes an incident permanently.
    pub async fn delete_incident(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
    ) -> AppResult<()> {
        self.authorization_service
            .require_capability(actor, Capability::DeleteIncident)?;

        self.repository.delete_incident(incident_id).await?;

        info!(
            incident_id = %incident_id,
            subject = %actor.subject(),
            "incident deleted"
        );
        Ok(())
    }
}
