mod common;
mod incidents;
mod security;

pub use common::HealthResponse;
pub use incidents::{
    AddNoteRequest, AssignHandlerRequest, CreateIncidentRequest, EditIncidentRequest,
    IncidentListParams, IncidentResponse, IncidentStatusSummaryResponse, UpdateStatusRequest,
};
pub use security::{
    CapabilityCheckResponse, CurrentIdentityResponse, RoleCatalogEntryResponse,
    RolePermissionsResponse,
};
