use super::*;

impl IncidentService {
    /// Returns one incident.
    pub async fn get_incident(
        &self,
        actor: &UserIdentity,
        incident_id: IncidentId,
    ) -> AppResult<Incident> {
        self.authorization_service
            .require_capability(actor, Capability::ViewIncidents)?;

        self.load_incident(incident_id).await
    }

    /// Lists incidents matching the query, newest first.
    pub async fn list_incidents(
        &self,
        actor: &UserIdentity,
        query: IncidentListQuery,
    ) -> AppResult<Vec<Incident>> {
        self.authorization_service
            .require_capability(actor, Capability::ViewIncidents)?;

        self.repository.list_incidents(&query).await
    }

    /// Counts incidents per status.
    pub async fn status_summary(&self, actor: &UserIdentity) -> AppResult<IncidentStatusSummary> {
        self.authorization_service
            .require_capability(actor, Capability::ViewReports)?;

        let incidents = self
            .repository
            .list_incidents(&IncidentListQuery::default())
            .await?;

        Ok(IncidentStatusSummary::from_incidents(&incidents))
    }
}
