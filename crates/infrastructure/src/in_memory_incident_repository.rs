use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use civicwatch_application::{IncidentListQuery, IncidentRepository};
use civicwatch_core::{AppError, AppResult};
use civicwatch_domain::{Incident, IncidentId};
use tokio::sync::RwLock;

/// In-memory incident repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryIncidentRepository {
    incidents: RwLock<HashMap<IncidentId, Incident>>,
}

impl InMemoryIncidentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            incidents: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl IncidentRepository for InMemoryIncidentRepository {
    async fn find_incident(&self, incident_id: IncidentId) -> AppResult<Option<Incident>> {
        Ok(self.incidents.read().await.get(&incident_id).cloned())
    }

    async fn insert_incident(&self, incident: Incident) -> AppResult<()> {
        let mut incidents = self.incidents.write().await;

        if incidents.contains_key(&incident.id()) {
            return Err(AppError::Conflict(format!(
                "incident '{}' already exists",
                incident.id()
            )));
        }

        incidents.insert(incident.id(), incident);
        Ok(())
    }

    async fn update_incident(&self, incident: Incident, expected_version: u64) -> AppResult<()> {
        let mut incidents = self.incidents.write().await;

        let stored_version = incidents
            .get(&incident.id())
            .map(Incident::version)
            .ok_or_else(|| {
                AppError::NotFound(format!("incident '{}' does not exist", incident.id()))
            })?;

        if stored_version != expected_version {
            return Err(AppError::Conflict(format!(
                "incident '{}' was modified concurrently (expected version {expected_version}, stored version {stored_version})",
                incident.id()
            )));
        }

        incidents.insert(incident.id(), incident);
        Ok(())
    }

    async fn delete_incident(&self, incident_id: IncidentId) -> AppResult<()> {
        self.incidents
            .write()
            .await
            .remove(&incident_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("incident '{incident_id}' does not exist")))
    }

    async fn list_incidents(&self, query: &IncidentListQuery) -> AppResult<Vec<Incident>> {
        let incidents = self.incidents.read().await;

        let mut listed: Vec<Incident> = incidents
            .values()
            .filter(|incident| query.matches(incident))
            .cloned()
            .collect();
        listed.sort_by_key(|incident| (Reverse(incident.created_at()), incident.id().as_uuid()));

        Ok(listed)
    }
}
