use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use civicwatch_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/api/me", get(handlers::security::me_handler))
        .route("/api/me/can", get(handlers::security::can_perform_handler))
        .route(
            "/api/me/is-any-of",
            get(handlers::security::is_any_of_handler),
        )
        .route(
            "/api/incidents",
            get(handlers::incidents::list_incidents_handler)
                .post(handlers::incidents::create_incident_handler),
        )
        .route(
            "/api/incidents/summary",
            get(handlers::incidents::incident_summary_handler),
        )
        .route(
            "/api/incidents/{incident_id}",
            get(handlers::incidents::get_incident_handler)
                .patch(handlers::incidents::edit_incident_handler)
                .delete(handlers::incidents::delete_incident_handler),
        )
        .route(
            "/api/incidents/{incident_id}/status",
            put(handlers::incidents::update_status_handler),
        )
        .route(
            "/api/incidents/{incident_id}/notes",
            post(handlers::incidents::add_note_handler),
        )
        .route(
            "/api/incidents/{incident_id}/assignee",
            put(handlers::incidents::assign_handler_handler),
        )
        .route_layer(from_fn(middleware::require_identity));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/roles", get(handlers::security::list_roles_handler))
        .route(
            "/api/roles/{role}/permissions",
            get(handlers::security::role_permissions_handler),
        )
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
