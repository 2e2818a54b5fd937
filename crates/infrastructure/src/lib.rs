//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_incident_repository;
mod postgres_incident_repository;

pub use in_memory_incident_repository::InMemoryIncidentRepository;
pub use postgres_incident_repository::PostgresIncidentRepository;
