use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use civicwatch_core::AppError;
use civicwatch_domain::RolePermissionSet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentStoreConfig {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub incident_store: IncidentStoreConfig,
    pub role_permissions_path: Option<PathBuf>,
    pub seed_incidents: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let incident_store = match env::var("INCIDENT_STORE")
            .unwrap_or_else(|_| "memory".to_owned())
            .as_str()
        {
            "memory" => IncidentStoreConfig::Memory,
            "postgres" => IncidentStoreConfig::Postgres {
                database_url: required_non_empty_env("DATABASE_URL")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "INCIDENT_STORE must be either 'memory' or 'postgres', got '{other}'"
                )));
            }
        };

        if migrate_only && incident_store == IncidentStoreConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires INCIDENT_STORE=postgres".to_owned(),
            ));
        }

        let role_permissions_path = env::var("ROLE_PERMISSIONS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let seed_incidents = env::var("DEV_SEED_INCIDENTS")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            migrate_only,
            frontend_url,
            api_host,
            api_port,
            incident_store,
            role_permissions_path,
            seed_incidents,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    /// Loads the role permission table, falling back to the standard grants.
    pub fn role_permissions(&self) -> Result<RolePermissionSet, AppError> {
        let Some(path) = &self.role_permissions_path else {
            return Ok(RolePermissionSet::standard());
        };

        let raw = std::fs::read_to_string(path).map_err(|error| {
            AppError::Internal(format!(
                "failed to read ROLE_PERMISSIONS_PATH '{}': {error}",
                path.display()
            ))
        })?;
        parse_role_permissions(raw.as_str())
    }
}

pub fn parse_role_permissions(raw: &str) -> Result<RolePermissionSet, AppError> {
    serde_json::from_str::<RolePermissionSet>(raw)
        .map_err(|error| AppError::Validation(format!("invalid role permission table: {error}")))
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
