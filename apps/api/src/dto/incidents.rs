mod conversions;
mod types;

pub use types::{
    AddNoteRequest, AssignHandlerRequest, CreateIncidentRequest, EditIncidentRequest,
    IncidentListParams, IncidentResponse, IncidentStatusSummaryResponse, UpdateStatusRequest,
};
