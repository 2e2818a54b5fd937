use std::sync::Arc;

use civicwatch_application::{AuthorizationService, IncidentRepository, IncidentService};
use civicwatch_core::AppError;
use civicwatch_infrastructure::{InMemoryIncidentRepository, PostgresIncidentRepository};
use tracing::info;

use crate::api_config::{ApiConfig, IncidentStoreConfig};
use crate::state::AppState;

use super::database::connect_and_migrate;

/// Opens the configured incident store.
pub async fn build_incident_repository(
    config: &ApiConfig,
) -> Result<Arc<dyn IncidentRepository>, AppError> {
    match &config.incident_store {
        IncidentStoreConfig::Memory => {
            info!("using in-memory incident store");
            Ok(Arc::new(InMemoryIncidentRepository::new()))
        }
        IncidentStoreConfig::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            info!("using postgres incident store");
            Ok(Arc::new(PostgresIncidentRepository::new(pool)))
        }
    }
}

pub fn build_app_state(
    repository: Arc<dyn IncidentRepository>,
    config: &ApiConfig,
) -> Result<AppState, AppError> {
    let authorization_service = AuthorizationService::new(config.role_permissions()?);

    Ok(AppState {
        incident_service: IncidentService::new(repository, authorization_service.clone()),
        authorization_service,
    })
}
