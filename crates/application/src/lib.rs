//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod incident_ports;
mod incident_service;

pub use authorization_service::AuthorizationService;
pub use incident_ports::{IncidentListQuery, IncidentRepository, IncidentStatusSummary};
pub use incident_service::IncidentService;
