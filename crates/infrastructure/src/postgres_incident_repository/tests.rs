use chrono::{DateTime, TimeDelta, Utc};
use civicwatch_application::{IncidentListQuery, IncidentRepository};
use civicwatch_core::AppError;
use civicwatch_domain::{
    Coordinates, Incident, IncidentDraft, IncidentId, IncidentPriority, IncidentStatus,
};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::{IncidentRow, PostgresIncidentRepository, escape_like, incident_from_row};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres incident tests: {error}");
    }

    Some(pool)
}

fn incident(title: &str, location: &str, reported_at: DateTime<Utc>) -> Incident {
    let coordinates = Coordinates::new(21.0285, 105.8542).unwrap_or_else(|_| unreachable!());
    Incident::report(
        IncidentDraft {
            title: title.to_owned(),
            description: "Reported by resident".to_owned(),
            location: location.to_owned(),
            priority: IncidentPriority::High,
            coordinates,
        },
        reported_at,
    )
    .unwrap_or_else(|_| unreachable!())
}

fn unique_marker() -> String {
    Uuid::new_v4().simple().to_string()
}

fn row() -> IncidentRow {
    IncidentRow {
        id: Uuid::new_v4(),
        title: "Water main break".to_owned(),
        description: "Street flooding".to_owned(),
        location: "Alley 34".to_owned(),
        priority: "high".to_owned(),
        status: "in-progress".to_owned(),
        assignee: None,
        notes: vec!["Valve closed".to_owned()],
        created_at: Utc::now(),
        latitude: 21.0303,
        longitude: 105.8556,
        version: 3,
    }
}

#[test]
fn row_maps_to_incident() {
    let incident = incident_from_row(row());
    assert!(incident.is_ok());

    let incident = incident.unwrap_or_else(|_| unreachable!());
    assert_eq!(incident.status().as_str(), "in-progress");
    assert_eq!(incident.version(), 3);
    assert_eq!(incident.notes().len(), 1);
}

#[test]
fn corrupt_row_values_are_store_errors() {
    let mut bad_status = row();
    bad_status.status = "closed".to_owned();
    assert!(matches!(
        incident_from_row(bad_status),
        Err(AppError::Store(_))
    ));

    let mut bad_priority = row();
    bad_priority.priority = "urgent".to_owned();
    assert!(matches!(
        incident_from_row(bad_priority),
        Err(AppError::Store(_))
    ));

    let mut bad_latitude = row();
    bad_latitude.latitude = 120.0;
    assert!(matches!(
        incident_from_row(bad_latitude),
        Err(AppError::Store(_))
    ));

    let mut zero_version = row();
    zero_version.version = 0;
    assert!(matches!(
        incident_from_row(zero_version),
        Err(AppError::Store(_))
    ));
}

#[test]
fn row_with_negative_version_is_rejected() {
    let mut row = row();
    row.version = -1;
    assert!(matches!(incident_from_row(row), Err(AppError::Store(_))));
}

#[test]
fn like_wildcards_are_escaped() {
    assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
}

#[tokio::test]
async fn stale_version_update_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIncidentRepository::new(pool);
    let mut current = incident("Traffic light malfunction", "Hang Beo", Utc::now());
    assert!(repository.insert_incident(current.clone()).await.is_ok());

    let mut stale = current.clone();

    current.set_status(IncidentStatus::InProgress);
    assert!(repository.update_incident(current.clone(), 1).await.is_ok());

    assert!(stale.append_note("crew dispatched").is_ok());
    let result = repository.update_incident(stale, 1).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = repository.find_incident(current.id()).await;
    assert!(matches!(
        stored,
        Ok(Some(ref incident))
            if incident.version() == 2
                && incident.status() == IncidentStatus::InProgress
                && incident.notes().is_empty()
    ));
}

#[tokio::test]
async fn update_and_delete_of_missing_incident_are_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIncidentRepository::new(pool);
    let mut missing = incident("Fallen tree", "Tao Dan Park", Utc::now());
    missing.set_status(IncidentStatus::Resolved);

    let result = repository.update_incident(missing.clone(), 1).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = repository.delete_incident(missing.id()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = repository.find_incident(IncidentId::new()).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn duplicate_insert_is_a_conflict_and_delete_removes_row() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIncidentRepository::new(pool);
    let reported = incident("Pothole on the road", "Pham Ngu Lao", Utc::now());

    assert!(repository.insert_incident(reported.clone()).await.is_ok());
    let result = repository.insert_incident(reported.clone()).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    assert!(repository.delete_incident(reported.id()).await.is_ok());
    let result = repository.find_incident(reported.id()).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn list_filters_by_status_and_search_newest_first() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIncidentRepository::new(pool);
    let marker = unique_marker();
    let now = Utc::now();

    let open = incident(&format!("Burst pipe {marker}"), "Ba Trieu", now);
    let mut older = incident(
        &format!("Burst pipe {marker}"),
        "Ba Trieu",
        now - TimeDelta::minutes(10),
    );
    let mut newer = incident(
        "Fallen tree",
        &format!("Tao Dan Park {marker}"),
        now - TimeDelta::minutes(1),
    );
    let mut unrelated = incident("Fallen tree elsewhere", "Hoan Kiem", now);

    for started in [&mut older, &mut newer, &mut unrelated] {
        started.set_status(IncidentStatus::InProgress);
    }
    for reported in [&open, &older, &newer, &unrelated] {
        assert!(repository.insert_incident(reported.clone()).await.is_ok());
    }

    let listed = repository
        .list_incidents(&IncidentListQuery {
            status: Some(IncidentStatus::InProgress),
            search: Some(marker.to_uppercase()),
        })
        .await
        .unwrap_or_default();

    let ids = listed.iter().map(Incident::id).collect::<Vec<_>>();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}

#[tokio::test]
async fn search_treats_like_wildcards_literally() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIncidentRepository::new(pool);
    let marker = unique_marker();

    let literal = incident(&format!("{marker} 50% blocked"), "Cau Vang", Utc::now());
    let lookalike = incident(&format!("{marker} 50x blocked"), "Cau Vang", Utc::now());
    assert!(repository.insert_incident(literal.clone()).await.is_ok());
    assert!(repository.insert_incident(lookalike).await.is_ok());

    let listed = repository
        .list_incidents(&IncidentListQuery {
            status: None,
            search: Some(format!("{marker} 50%")),
        })
        .await
        .unwrap_or_default();

    let ids = listed.iter().map(Incident::id).collect::<Vec<_>>();
    assert_eq!(ids, vec![literal.id()]);
}
