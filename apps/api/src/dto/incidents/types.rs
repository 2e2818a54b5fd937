use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for reporting an incident.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-incident-request.ts"
)]
pub struct CreateIncidentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[ts(type = "\"high\" | \"medium\" | \"low\"")]
    pub priority: String,
    pub lat: f64,
    pub lng: f64,
}

/// Incoming payload for editing descriptive incident fields.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/edit-incident-request.ts"
)]
pub struct EditIncidentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[ts(type = "\"high\" | \"medium\" | \"low\"")]
    pub priority: String,
}

/// Incoming payload for a status change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-status-request.ts"
)]
pub struct UpdateStatusRequest {
    #[ts(type = "\"open\" | \"in-progress\" | \"resolved\"")]
    pub status: String,
}

/// Incoming payload for appending a note.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-note-request.ts"
)]
pub struct AddNoteRequest {
    pub text: String,
}

/// Incoming payload for setting or clearing the assignee.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-handler-request.ts"
)]
pub struct AssignHandlerRequest {
    #[ts(type = "string | null")]
    pub assignee: Option<String>,
}

/// Query string accepted by the incident list.
#[derive(Debug, Default, Deserialize)]
pub struct IncidentListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// API representation of an incident.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/incident-response.ts"
)]
pub struct IncidentResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[ts(type = "\"high\" | \"medium\" | \"low\"")]
    pub priority: String,
    #[ts(type = "\"open\" | \"in-progress\" | \"resolved\"")]
    pub status: String,
    pub assignee: Option<String>,
    pub notes: Vec<String>,
    pub created_at: String,
    pub lat: f64,
    pub lng: f64,
    #[ts(type = "number")]
    pub version: u64,
}

/// Incident counts per status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/incident-status-summary-response.ts"
)]
pub struct IncidentStatusSummaryResponse {
    #[ts(type = "number")]
    pub total: usize,
    #[ts(type = "number")]
    pub open: usize,
    #[ts(type = "number")]
    pub in_progress: usize,
    #[ts(type = "number")]
    pub resolved: usize,
}
