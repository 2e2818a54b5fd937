use civicwatch_application::{AuthorizationService, IncidentService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub incident_service: IncidentService,
    pub authorization_service: AuthorizationService,
}
