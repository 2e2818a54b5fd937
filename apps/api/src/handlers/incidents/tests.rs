use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use civicwatch_application::{AuthorizationService, IncidentService};
use civicwatch_domain::{Role, UserIdentity};
use civicwatch_infrastructure::InMemoryIncidentRepository;

use super::{
    add_note_handler, create_incident_handler, delete_incident_handler, get_incident_handler,
    incident_summary_handler, list_incidents_handler, update_status_handler,
};
use crate::dto::{
    AddNoteRequest, CreateIncidentRequest, IncidentListParams, IncidentResponse,
    UpdateStatusRequest,
};
use crate::state::AppState;

fn app_state() -> AppState {
    let authorization_service = AuthorizationService::default();
    AppState {
        incident_service: IncidentService::new(
            Arc::new(InMemoryIncidentRepository::new()),
            authorization_service.clone(),
        ),
        authorization_service,
    }
}

fn actor(role: Role) -> Extension<UserIdentity> {
    Extension(UserIdentity::new(format!("{role}-1"), role))
}

async fn report(state: &AppState) -> IncidentResponse {
    let result = create_incident_handler(
        State(state.clone()),
        actor(Role::Supervisor),
        Json(CreateIncidentRequest {
            title: "Burst water main".to_owned(),
            description: "Main pipe burst".to_owned(),
            location: "Alley 34 Ba Trieu".to_owned(),
            priority: "high".to_owned(),
            lat: 21.0303,
            lng: 105.8556,
        }),
    )
    .await;

    match result {
        Ok((status, Json(incident))) => {
            assert_eq!(status, StatusCode::CREATED);
            incident
        }
        Err(error) => panic!("create failed: {error:?}"),
    }
}

async fn set_status(
    state: &AppState,
    role: Role,
    incident_id: &str,
    status: &str,
) -> Result<IncidentResponse, StatusCode> {
    update_status_handler(
        State(state.clone()),
        actor(role),
        Path(incident_id.to_owned()),
        Json(UpdateStatusRequest {
            status: status.to_owned(),
        }),
    )
    .await
    .map(|Json(incident)| incident)
    .map_err(|error| error.into_response().status())
}

#[tokio::test]
async fn handler_resolves_only_after_supervisor_starts_work() {
    let state = app_state();
    let incident = report(&state).await;
    assert_eq!(incident.status, "open");
    assert_eq!(incident.version, 1);

    let denied = set_status(&state, Role::Handler, &incident.id, "resolved").await;
    assert!(matches!(denied, Err(StatusCode::FORBIDDEN)));

    let started = set_status(&state, Role::Supervisor, &incident.id, "in-progress").await;
    assert!(matches!(started, Ok(ref value) if value.status == "in-progress"));

    let resolved = set_status(&state, Role::Handler, &incident.id, "resolved").await;
    assert!(matches!(resolved, Ok(ref value) if value.status == "resolved" && value.version == 3));
}

#[tokio::test]
async fn unknown_status_value_is_a_bad_request() {
    let state = app_state();
    let incident = report(&state).await;

    let result = set_status(&state, Role::Coordinator, &incident.id, "closed").await;
    assert!(matches!(result, Err(StatusCode::BAD_REQUEST)));
}

#[tokio::test]
async fn handler_delete_is_forbidden_even_for_missing_incidents() {
    let state = app_state();
    let incident = report(&state).await;

    for incident_id in [incident.id.clone(), "00000000-0000-4000-8000-000000000000".to_owned()] {
        let status = delete_incident_handler(
            State(state.clone()),
            actor(Role::Handler),
            Path(incident_id),
        )
        .await
        .into_response()
        .status();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let status = delete_incident_handler(
        State(state.clone()),
        actor(Role::Supervisor),
        Path(incident.id),
    )
    .await
    .into_response()
    .status();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn get_maps_bad_and_missing_ids() {
    let state = app_state();

    let status = get_incident_handler(
        State(state.clone()),
        actor(Role::Handler),
        Path("not-a-uuid".to_owned()),
    )
    .await
    .into_response()
    .status();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = get_incident_handler(
        State(state),
        actor(Role::Handler),
        Path("00000000-0000-4000-8000-000000000000".to_owned()),
    )
    .await
    .into_response()
    .status();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_accumulate_and_list_filters_by_status() {
    let state = app_state();
    let incident = report(&state).await;

    for _ in 0..2 {
        let result = add_note_handler(
            State(state.clone()),
            actor(Role::Handler),
            Path(incident.id.clone()),
            Json(AddNoteRequest {
                text: "crew dispatched".to_owned(),
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    let listed = list_incidents_handler(
        State(state.clone()),
        actor(Role::Handler),
        Query(IncidentListParams {
            status: Some("open".to_owned()),
            search: Some("ba trieu".to_owned()),
        }),
    )
    .await;
    assert!(matches!(
        listed,
        Ok(Json(ref incidents)) if incidents.len() == 1 && incidents[0].notes.len() == 2
    ));

    let listed = list_incidents_handler(
        State(state),
        actor(Role::Handler),
        Query(IncidentListParams {
            status: Some("resolved".to_owned()),
            search: None,
        }),
    )
    .await;
    assert!(matches!(listed, Ok(Json(ref incidents)) if incidents.is_empty()));
}

#[tokio::test]
async fn summary_requires_report_access() {
    let state = app_state();
    report(&state).await;

    let status = incident_summary_handler(State(state.clone()), actor(Role::Handler))
        .await
        .into_response()
        .status();
    assert_eq!(status, StatusCode::FORBIDDEN);

    let summary = incident_summary_handler(State(state), actor(Role::Coordinator)).await;
    assert!(matches!(
        summary,
        Ok(Json(ref value)) if value.total == 1 && value.open == 1
    ));
}
