use civicwatch_application::{IncidentListQuery, IncidentStatusSummary};
use civicwatch_core::AppError;
use civicwatch_domain::{
    Coordinates, Incident, IncidentDraft, IncidentEdit, IncidentPriority, IncidentStatus,
};

use super::types::{
    CreateIncidentRequest, EditIncidentRequest, IncidentListParams, IncidentResponse,
    IncidentStatusSummaryResponse,
};

impl From<Incident> for IncidentResponse {
    fn from(value: Incident) -> Self {
        Self {
            id: value.id().to_string(),
            title: value.title().to_owned(),
            description: value.description().to_owned(),
            location: value.location().to_owned(),
            priority: value.priority().as_str().to_owned(),
            status: value.status().as_str().to_owned(),
            assignee: value.assignee().map(str::to_owned),
            notes: value.notes().to_vec(),
            created_at: value.created_at().to_rfc3339(),
            lat: value.coordinates().latitude(),
            lng: value.coordinates().longitude(),
            version: value.version(),
        }
    }
}

impl From<IncidentStatusSummary> for IncidentStatusSummaryResponse {
    fn from(value: IncidentStatusSummary) -> Self {
        Self {
            total: value.total,
            open: value.open,
            in_progress: value.in_progress,
            resolved: value.resolved,
        }
    }
}

impl TryFrom<CreateIncidentRequest> for IncidentDraft {
    type Error = AppError;

    fn try_from(value: CreateIncidentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title,
            description: value.description,
            location: value.location,
            priority: value.priority.parse::<IncidentPriority>()?,
            coordinates: Coordinates::new(value.lat, value.lng)?,
        })
    }
}

impl TryFrom<EditIncidentRequest> for IncidentEdit {
    type Error = AppError;

    fn try_from(value: EditIncidentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.title,
            description: value.description,
            location: value.location,
            priority: value.priority.parse::<IncidentPriority>()?,
        })
    }
}

impl TryFrom<IncidentListParams> for IncidentListQuery {
    type Error = AppError;

    fn try_from(value: IncidentListParams) -> Result<Self, Self::Error> {
        let status = value
            .status
            .as_deref()
            .filter(|status| !status.is_empty() && *status != "all")
            .map(str::parse::<IncidentStatus>)
            .transpose()?;

        Ok(Self {
            status,
            search: value.search,
        })
    }
}
