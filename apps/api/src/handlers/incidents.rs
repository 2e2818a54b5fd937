use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use civicwatch_application::IncidentListQuery;
use civicwatch_domain::{IncidentDraft, IncidentEdit, IncidentId, IncidentStatus, UserIdentity};

use crate::dto::{
    AddNoteRequest, AssignHandlerRequest, CreateIncidentRequest, EditIncidentRequest,
    IncidentListParams, IncidentResponse, IncidentStatusSummaryResponse, UpdateStatusRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_incidents_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<IncidentListParams>,
) -> ApiResult<Json<Vec<IncidentResponse>>> {
    let query = IncidentListQuery::try_from(params)?;
    let incidents = state
        .incident_service
        .list_incidents(&user, query)
        .await?
        .into_iter()
        .map(IncidentResponse::from)
        .collect();

    Ok(Json(incidents))
}

pub async fn create_incident_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateIncidentRequest>,
) -> ApiResult<(StatusCode, Json<IncidentResponse>)> {
    let draft = IncidentDraft::try_from(payload)?;
    let incident = state.incident_service.create_incident(&user, draft).await?;

    Ok((StatusCode::CREATED, Json(IncidentResponse::from(incident))))
}

pub async fn incident_summary_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<IncidentStatusSummaryResponse>> {
    let summary = state.incident_service.status_summary(&user).await?;

    Ok(Json(IncidentStatusSummaryResponse::from(summary)))
}

pub async fn get_incident_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
) -> ApiResult<Json<IncidentResponse>> {
    let incident = state
        .incident_service
        .get_incident(&user, IncidentId::parse(incident_id.as_str())?)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

pub async fn edit_incident_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
    Json(payload): Json<EditIncidentRequest>,
) -> ApiResult<Json<IncidentResponse>> {
    let edit = IncidentEdit::try_from(payload)?;
    let incident = state
        .incident_service
        .edit_incident(&user, IncidentId::parse(incident_id.as_str())?, edit)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

pub async fn delete_incident_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .incident_service
        .delete_incident(&user, IncidentId::parse(incident_id.as_str())?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<Json<IncidentResponse>> {
    let status = payload.status.parse::<IncidentStatus>()?;
    let incident = state
        .incident_service
        .update_status(&user, IncidentId::parse(incident_id.as_str())?, status)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

pub async fn add_note_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
    Json(payload): Json<AddNoteRequest>,
) -> ApiResult<Json<IncidentResponse>> {
    let incident = state
        .incident_service
        .add_note(&user, IncidentId::parse(incident_id.as_str())?, payload.text)
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

pub async fn assign_handler_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(incident_id): Path<String>,
    Json(payload): Json<AssignHandlerRequest>,
) -> ApiResult<Json<IncidentResponse>> {
    let incident = state
        .incident_service
        .assign_handler(
            &user,
            IncidentId::parse(incident_id.as_str())?,
            payload.assignee,
        )
        .await?;

    Ok(Json(IncidentResponse::from(incident)))
}

#[cfg(test)]
mod tests;
