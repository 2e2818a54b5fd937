use async_trait::async_trait;
use civicwatch_core::AppResult;
use civicwatch_domain::{Incident, IncidentId, IncidentStatus};

/// Filters applied when listing incidents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentListQuery {
    /// Only incidents in this status.
    pub status: Option<IncidentStatus>,
    /// Case-insensitive text matched against title and location.
    pub search: Option<String>,
}

impl IncidentListQuery {
    /// Returns the search term lowercased, ignoring blank input.
    #[must_use]
    pub fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns whether the incident passes the filters.
    #[must_use]
    pub fn matches(&self, incident: &Incident) -> bool {
        if self
            .status
            .is_some_and(|status| status != incident.status())
        {
            return false;
        }

        self.normalized_search().is_none_or(|term| {
            incident.title().to_lowercase().contains(term.as_str())
                || incident.location().to_lowercase().contains(term.as_str())
        })
    }
}

/// Incident counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentStatusSummary {
    /// All incidents.
    pub total: usize,
    /// Incidents in `open`.
    pub open: usize,
    /// Incidents in `in-progress`.
    pub in_progress: usize,
    /// Incidents in `resolved`.
    pub resolved: usize,
}

impl IncidentStatusSummary {
    /// Counts the incidents by status.
    #[must_use]
    pub fn from_incidents<'a>(incidents: impl IntoIterator<Item = &'a Incident>) -> Self {
        incidents
            .into_iter()
            .fold(Self::default(), |mut summary, incident| {
                summary.total += 1;
                match incident.status() {
                    IncidentStatus::Open => summary.open += 1,
                    IncidentStatus::InProgress => summary.in_progress += 1,
                    IncidentStatus::Resolved => summary.resolved += 1,
                }
                summary
            })
    }
}

/// Repository port for incident persistence.
///
/// Writes use optimistic concurrency: `update_incident` only succeeds when the
/// stored version equals `expected_version`.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Finds one incident by id.
    async fn find_incident(&self, incident_id: IncidentId) -> AppResult<Option<Incident>>;

    /// Stores a new incident. Fails with a conflict when the id already exists.
    async fn insert_incident(&self, incident: Incident) -> AppResult<()>;

    /// Replaces a stored incident written at `expected_version`.
    async fn update_incident(&self, incident: Incident, expected_version: u64) -> AppResult<()>;

    /// Removes an incident. Fails with not found when it does not exist.
    async fn delete_incident(&self, incident_id: IncidentId) -> AppResult<()>;

    /// Lists incidents matching the query, newest first.
    async fn list_incidents(&self, query: &IncidentListQuery) -> AppResult<Vec<Incident>>;
}
