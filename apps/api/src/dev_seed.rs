use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use civicwatch_application::{IncidentListQuery, IncidentRepository};
use civicwatch_core::{AppError, AppResult};
use civicwatch_domain::{
    Coordinates, Incident, IncidentId, IncidentPriority, IncidentStatus, StoredIncident,
};
use tracing::info;

struct SeedIncident {
    title: &'static str,
    status: IncidentStatus,
    priority: IncidentPriority,
    location: &'static str,
    description: &'static str,
    reported_on: (i32, u32, u32),
    coordinates: (f64, f64),
}

const SEED_INCIDENTS: &[SeedIncident] = &[
    SeedIncident {
        title: "Damaged road surface in district A",
        status: IncidentStatus::Open,
        priority: IncidentPriority::High,
        location: "Nguyen Hue Street, Hanoi",
        description: "Road surface is broken and needs repair",
        reported_on: (2026, 2, 5),
        coordinates: (21.0285, 105.8542),
    },
    SeedIncident {
        title: "Traffic light malfunction",
        status: IncidentStatus::InProgress,
        priority: IncidentPriority::Medium,
        location: "Hang Beo and Ba Trieu intersection",
        description: "Traffic lights are not cycling normally",
        reported_on: (2026, 2, 4),
        coordinates: (21.0294, 105.8553),
    },
    SeedIncident {
        title: "Fallen tree",
        status: IncidentStatus::Open,
        priority: IncidentPriority::High,
        location: "Tao Dan Park",
        description: "A large tree was knocked down by strong wind",
        reported_on: (2026, 2, 5),
        coordinates: (21.0283, 105.8475),
    },
    SeedIncident {
        title: "Pothole on the road",
        status: IncidentStatus::Resolved,
        priority: IncidentPriority::Medium,
        location: "Pham Ngu Lao Street",
        description: "Deep pothole in the carriageway has been filled",
        reported_on: (2026, 2, 1),
        coordinates: (21.0289, 105.8461),
    },
    SeedIncident {
        title: "Burst water main",
        status: IncidentStatus::InProgress,
        priority: IncidentPriority::High,
        location: "Alley 34 Ba Trieu",
        description: "Main water pipe burst and is flooding the alley",
        reported_on: (2026, 2, 5),
        coordinates: (21.0303, 105.8556),
    },
    SeedIncident {
        title: "Slippery bridge deck",
        status: IncidentStatus::Open,
        priority: IncidentPriority::Low,
        location: "Golden Bridge",
        description: "Bridge surface is slippery after rain and needs cleaning",
        reported_on: (2026, 2, 3),
        coordinates: (21.0275, 105.8520),
    },
];

/// Inserts the sample municipal incidents when the store is empty.
pub async fn run(repository: Arc<dyn IncidentRepository>) -> AppResult<()> {
    let existing = repository
        .list_incidents(&IncidentListQuery::default())
        .await?;
    if !existing.is_empty() {
        info!(
            existing = existing.len(),
            "incident store already populated, skipping dev seed"
        );
        return Ok(());
    }

    for seed in SEED_INCIDENTS {
        repository.insert_incident(seed_incident(seed)?).await?;
    }

    info!(count = SEED_INCIDENTS.len(), "seeded sample incidents");
    Ok(())
}

fn seed_incident(seed: &SeedIncident) -> AppResult<Incident> {
    let (latitude, longitude) = seed.coordinates;

    Incident::from_stored(StoredIncident {
        id: IncidentId::new(),
        title: seed.title.to_owned(),
        description: seed.description.to_owned(),
        location: seed.location.to_owned(),
        priority: seed.priority,
        status: seed.status,
        assignee: None,
        notes: Vec::new(),
        created_at: reported_at(seed.reported_on)?,
        coordinates: Coordinates::new(latitude, longitude)?,
        version: 1,
    })
}

fn reported_at((year, month, day): (i32, u32, u32)) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 8, 0, 0)
        .single()
        .ok_or_else(|| AppError::Internal(format!("invalid seed date {year}-{month}-{day}")))
}
