use std::sync::Arc;

use chrono::Utc;
use civicwatch_core::{AppError, AppResult};
use civicwatch_domain::{
    Capability, Incident, IncidentDraft, IncidentEdit, IncidentId, IncidentStatus,
    StatusGateDecision, UNCONDITIONAL_STATUS_ROLES, UserIdentity,
};
use tracing::{debug, info};

use crate::AuthorizationService;
use crate::incident_ports::{IncidentListQuery, IncidentRepository, IncidentStatusSummary};

mod queries;
mod reporting;
mod status;
mod work;

/// Application service for the incident lifecycle.
///
/// Every operation takes the acting identity explicitly, checks it through
/// [`AuthorizationService`], reads the current record and writes back with
/// the version it read.
#[derive(Clone)]
pub struct IncidentService {
    repository: Arc<dyn IncidentRepository>,
    authorization_service: AuthorizationService,
}

impl IncidentService {
    /// Creates a new incident service from a repository implementation.
    #[must_use]
    pub fn new(
        repository: Arc<dyn IncidentRepository>,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            repository,
            authorization_service,
        }
    }

    /// Returns the authorization service used for decisions.
    #[must_use]
    pub fn authorization_service(&self) -> &AuthorizationService {
        &self.authorization_service
    }

    async fn load_incident(&self, incident_id: IncidentId) -> AppResult<Incident> {
        self.repository
            .find_incident(incident_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("incident '{incident_id}' does not exist")))
    }

    async fn store_revision(&self, incident: &Incident, expected_version: u64) -> AppResult<()> {
        self.repository
            .update_incident(incident.clone(), expected_version)
            .await
    }
}
