use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civicwatch_application::{IncidentListQuery, IncidentRepository};
use civicwatch_core::{AppError, AppResult};
use civicwatch_domain::{
    Coordinates, Incident, IncidentId, IncidentPriority, IncidentStatus, StoredIncident,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed incident repository.
#[derive(Clone)]
pub struct PostgresIncidentRepository {
    pool: PgPool,
}

impl PostgresIncidentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IncidentRow {
    id: Uuid,
    title: String,
    description: String,
    location: String,
    priority: String,
    status: String,
    assignee: Option<String>,
    notes: Vec<String>,
    created_at: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    version: i64,
}

fn incident_from_row(row: IncidentRow) -> AppResult<Incident> {
    let incident_id = row.id;
    let version = u64::try_from(row.version).map_err(|error| {
        AppError::Store(format!(
            "incident '{incident_id}' has invalid version {}: {error}",
            row.version
        ))
    })?;
    let priority = stored_field(incident_id, row.priority.parse::<IncidentPriority>())?;
    let status = stored_field(incident_id, row.status.parse::<IncidentStatus>())?;
    let coordinates = stored_field(incident_id, Coordinates::new(row.latitude, row.longitude))?;

    stored_field(
        incident_id,
        Incident::from_stored(StoredIncident {
            id: IncidentId::from_uuid(incident_id),
            title: row.title,
            description: row.description,
            location: row.location,
            priority,
            status,
            assignee: row.assignee,
            notes: row.notes,
            created_at: row.created_at,
            coordinates,
            version,
        }),
    )
}

/// Maps a row validation failure to a store error.
fn stored_field<T>(incident_id: Uuid, result: AppResult<T>) -> AppResult<T> {
    result.map_err(|error| {
        AppError::Store(format!("incident '{incident_id}' has corrupt stored data: {error}"))
    })
}

fn version_param(version: u64) -> AppResult<i64> {
    i64::try_from(version)
        .map_err(|error| AppError::Store(format!("incident version {version} overflows: {error}")))
}

#[async_trait]
impl IncidentRepository for PostgresIncidentRepository {
    async fn find_incident(&self, incident_id: IncidentId) -> AppResult<Option<Incident>> {
        let row = sqlx::query_as::<_, IncidentRow>(
            r#"
            SELECT id, title, description, location, priority, status, assignee, notes,
                   created_at, latitude, longitude, version
            FROM incidents
            WHERE id = $1
            "#,
        )
        .bind(incident_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Store(format!("failed to find incident '{incident_id}': {error}"))
        })?;

        row.map(incident_from_row).transpose()
    }

    async fn insert_incident(&self, incident: Incident) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO incidents (
                id, title, description, location, priority, status, assignee, notes,
                created_at, latitude, longitude, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(incident.id().as_uuid())
        .bind(incident.title())
        .bind(incident.description())
        .bind(incident.location())
        .bind(incident.priority().as_str())
        .bind(incident.status().as_str())
        .bind(incident.assignee())
        .bind(incident.notes())
        .bind(incident.created_at())
        .bind(incident.coordinates().latitude())
        .bind(incident.coordinates().longitude())
        .bind(version_param(incident.version())?)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Store(format!(
                "failed to insert incident '{}': {error}",
                incident.id()
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "incident '{}' already exists",
                incident.id()
            )));
        }

        Ok(())
    }

    async fn update_incident(&self, incident: Incident, expected_version: u64) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE incidents
            SET
                title = $3,
                description = $4,
                location = $5,
                priority = $6,
                status = $7,
                assignee = $8,
                notes = $9,
                version = $10,
                updated_at = now()
            WHERE id = $1
              AND version = $2
            "#,
        )
        .bind(incident.id().as_uuid())
        .bind(version_param(expected_version)?)
        .bind(incident.title())
        .bind(incident.description())
        .bind(incident.location())
        .bind(incident.priority().as_str())
        .bind(incident.status().as_str())
        .bind(incident.assignee())
        .bind(incident.notes())
        .bind(version_param(incident.version())?)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Store(format!(
                "failed to update incident '{}': {error}",
                incident.id()
            ))
        })?;

        if result.rows_affected() == 0 {
            return match self.find_incident(incident.id()).await? {
                Some(stored) => Err(AppError::Conflict(format!(
                    "incident '{}' was modified concurrently (expected version {expected_version}, stored version {})",
                    incident.id(),
                    stored.version()
                ))),
                None => Err(AppError::NotFound(format!(
                    "incident '{}' does not exist",
                    incident.id()
                ))),
            };
        }

        Ok(())
    }

    async fn delete_incident(&self, incident_id: IncidentId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(incident_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Store(format!("failed to delete incident '{incident_id}': {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "incident '{incident_id}' does not exist"
            )));
        }

        Ok(())
    }

    async fn list_incidents(&self, query: &IncidentListQuery) -> AppResult<Vec<Incident>> {
        let search_pattern = query
            .normalized_search()
            .map(|term| format!("%{}%", escape_like(term.as_str())));

        let rows = sqlx::query_as::<_, IncidentRow>(
            r#"
            SELECT id, title, description, location, priority, status, assignee, notes,
                   created_at, latitude, longitude, version
            FROM incidents
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR title ILIKE $2 OR location ILIKE $2)
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .bind(search_pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to list incidents: {error}")))?;

        rows.into_iter().map(incident_from_row).collect()
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests;
