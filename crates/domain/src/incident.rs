//! Incident aggregate and its value types.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use civicwatch_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentId(Uuid);

impl IncidentId {
    /// Creates a new random incident identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an incident identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into an incident identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid incident id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for IncidentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for IncidentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncidentStatus {
    /// Reported and waiting for work.
    Open,
    /// Being worked.
    InProgress,
    /// Work finished.
    Resolved,
}

impl IncidentStatus {
    /// Returns a stable transport value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }

    /// Returns all statuses in lifecycle order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Open, Self::InProgress, Self::Resolved]
    }
}

impl FromStr for IncidentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(AppError::Validation(format!(
                "unknown incident status '{value}'"
            ))),
        }
    }
}

impl Display for IncidentStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Urgency assigned when an incident is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentPriority {
    /// Needs immediate attention.
    High,
    /// Default urgency.
    Medium,
    /// Can wait.
    Low,
}

impl IncidentPriority {
    /// Returns a stable transport value for this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for IncidentPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(AppError::Validation(format!(
                "unknown incident priority '{value}'"
            ))),
        }
    }
}

/// Geographic position of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates validated WGS84 coordinates.
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::Validation(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::Validation(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Fields supplied when reporting a new incident.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentDraft {
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable place.
    pub location: String,
    /// Initial urgency.
    pub priority: IncidentPriority,
    /// Map position.
    pub coordinates: Coordinates,
}

/// Descriptive fields replaced by an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentEdit {
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable place.
    pub location: String,
    /// Urgency.
    pub priority: IncidentPriority,
}

/// Persisted incident state used by repositories to rebuild the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredIncident {
    /// Stable identifier.
    pub id: IncidentId,
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable place.
    pub location: String,
    /// Urgency.
    pub priority: IncidentPriority,
    /// Lifecycle status.
    pub status: IncidentStatus,
    /// Assigned user reference.
    pub assignee: Option<String>,
    /// Notes in insertion order.
    pub notes: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Map position.
    pub coordinates: Coordinates,
    /// Revision counter.
    pub version: u64,
}

/// A reported municipal problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    id: IncidentId,
    title: NonEmptyString,
    description: String,
    location: String,
    priority: IncidentPriority,
    status: IncidentStatus,
    assignee: Option<String>,
    notes: Vec<String>,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    version: u64,
}

impl Incident {
    /// Reports a new incident in the `open` state with no notes.
    pub fn report(draft: IncidentDraft, created_at: DateTime<Utc>) -> AppResult<Self> {
        Ok(Self {
            id: IncidentId::new(),
            title: NonEmptyString::new(draft.title)?,
            description: draft.description,
            location: draft.location,
            priority: draft.priority,
            status: IncidentStatus::Open,
            assignee: None,
            notes: Vec::new(),
            created_at,
            coordinates: draft.coordinates,
            version: 1,
        })
    }

    /// Rebuilds an incident from persisted state.
    pub fn from_stored(stored: StoredIncident) -> AppResult<Self> {
        if stored.version == 0 {
            return Err(AppError::Validation(format!(
                "incident '{}' has invalid version 0",
                stored.id
            )));
        }

        Ok(Self {
            id: stored.id,
            title: NonEmptyString::new(stored.title)?,
            description: stored.description,
            location: stored.location,
            priority: stored.priority,
            status: stored.status,
            assignee: stored.assignee,
            notes: stored.notes,
            created_at: stored.created_at,
            coordinates: stored.coordinates,
            version: stored.version,
        })
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> IncidentId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the human-readable location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Returns the priority.
    #[must_use]
    pub fn priority(&self) -> IncidentPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> IncidentStatus {
        self.status
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the notes in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        self.notes.as_slice()
    }

    /// Returns the creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the map position.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the revision counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the status. Any status may follow any other.
    pub fn set_status(&mut self, status: IncidentStatus) {
        self.status = status;
        self.bump_version();
    }

    /// Appends a note. Identical notes are kept as separate entries.
    pub fn append_note(&mut self, text: impl Into<String>) -> AppResult<()> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "note must not be empty or whitespace".to_owned(),
            ));
        }

        self.notes.push(text);
        self.bump_version();
        Ok(())
    }

    /// Sets or clears the assignee. A blank reference clears it.
    pub fn set_assignee(&mut self, assignee: Option<String>) {
        self.assignee = assignee.filter(|value| !value.trim().is_empty());
        self.bump_version();
    }

    /// Replaces the descriptive fields and priority.
    pub fn apply_edit(&mut self, edit: IncidentEdit) -> AppResult<()> {
        self.title = NonEmptyString::new(edit.title)?;
        self.description = edit.description;
        self.location = edit.location;
        self.priority = edit.priority;
        self.bump_version();
        Ok(())
    }

    fn bump_version(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{
        Coordinates, Incident, IncidentDraft, IncidentEdit, IncidentPriority, IncidentStatus,
    };

    fn draft() -> IncidentDraft {
        IncidentDraft {
            title: "Broken traffic light".to_owned(),
            description: "Signal stuck on red".to_owned(),
            location: "Hang Bai - Ba Trieu junction".to_owned(),
            priority: IncidentPriority::Medium,
            coordinates: Coordinates::new(21.0294, 105.8553).unwrap_or_else(|_| unreachable!()),
        }
    }

    #[test]
    fn reported_incident_starts_open_without_notes() {
        let incident = Incident::report(draft(), Utc::now());
        assert!(incident.is_ok());

        let incident = incident.unwrap_or_else(|_| unreachable!());
        assert_eq!(incident.status(), IncidentStatus::Open);
        assert!(incident.notes().is_empty());
        assert!(incident.assignee().is_none());
        assert_eq!(incident.version(), 1);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut draft = draft();
        draft.title = "  ".to_owned();
        assert!(Incident::report(draft, Utc::now()).is_err());
    }

    #[test]
    fn coordinates_outside_range_are_rejected() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn status_transitions_are_unconstrained() {
        let mut incident = Incident::report(draft(), Utc::now()).unwrap_or_else(|_| unreachable!());
        incident.set_status(IncidentStatus::Resolved);
        incident.set_status(IncidentStatus::Open);
        assert_eq!(incident.status(), IncidentStatus::Open);
        assert_eq!(incident.version(), 3);
    }

    #[test]
    fn duplicate_notes_are_kept() {
        let mut incident = Incident::report(draft(), Utc::now()).unwrap_or_else(|_| unreachable!());
        assert!(incident.append_note("Replaced bulb").is_ok());
        assert!(incident.append_note("Replaced bulb").is_ok());
        assert_eq!(incident.notes(), ["Replaced bulb", "Replaced bulb"]);
    }

    #[test]
    fn blank_note_leaves_incident_untouched() {
        let mut incident = Incident::report(draft(), Utc::now()).unwrap_or_else(|_| unreachable!());
        assert!(incident.append_note("   ").is_err());
        assert!(incident.notes().is_empty());
        assert_eq!(incident.version(), 1);
    }

    #[test]
    fn blank_assignee_clears_assignment() {
        let mut incident = Incident::report(draft(), Utc::now()).unwrap_or_else(|_| unreachable!());
        incident.set_assignee(Some("Tran Thi B".to_owned()));
        assert_eq!(incident.assignee(), Some("Tran Thi B"));

        incident.set_assignee(Some(String::new()));
        assert!(incident.assignee().is_none());
        assert_eq!(incident.status(), IncidentStatus::Open);
    }

    #[test]
    fn edit_keeps_status_and_notes() {
        let mut incident = Incident::report(draft(), Utc::now()).unwrap_or_else(|_| unreachable!());
        incident.set_status(IncidentStatus::InProgress);
        assert!(incident.append_note("Checked wiring").is_ok());

        let result = incident.apply_edit(IncidentEdit {
            title: "Traffic light outage".to_owned(),
            description: "Whole junction dark".to_owned(),
            location: "Hang Bai".to_owned(),
            priority: IncidentPriority::High,
        });
        assert!(result.is_ok());
        assert_eq!(incident.title(), "Traffic light outage");
        assert_eq!(incident.priority(), IncidentPriority::High);
        assert_eq!(incident.status(), IncidentStatus::InProgress);
        assert_eq!(incident.notes().len(), 1);
    }

    #[test]
    fn status_transport_values_use_kebab_case() {
        assert_eq!(IncidentStatus::InProgress.as_str(), "in-progress");
        assert!(matches!(
            "in-progress".parse::<IncidentStatus>(),
            Ok(IncidentStatus::InProgress)
        ));
        assert!("in_progress".parse::<IncidentStatus>().is_err());
    }
}
