use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use civicwatch_core::AppError;
use civicwatch_domain::{Capability, Role, UserIdentity};
use serde::Deserialize;

use crate::dto::{
    CapabilityCheckResponse, CurrentIdentityResponse, RoleCatalogEntryResponse,
    RolePermissionsResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CapabilityCheckQuery {
    pub capability: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleMembershipQuery {
    #[serde(default)]
    pub roles: String,
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> Json<Vec<RoleCatalogEntryResponse>> {
    let roles = Role::all()
        .iter()
        .map(|role| {
            RoleCatalogEntryResponse::new(
                *role,
                state.authorization_service.list_permissions(*role),
            )
        })
        .collect();

    Json(roles)
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let role = Role::from_transport(role.as_str())
        .map_err(|_| AppError::NotFound(format!("role '{role}' does not exist")))?;

    Ok(Json(RolePermissionsResponse::new(
        role,
        state.authorization_service.list_permissions(role),
    )))
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Json<CurrentIdentityResponse> {
    let capabilities = state.authorization_service.list_permissions(user.role());

    Json(CurrentIdentityResponse::new(&user, capabilities))
}

pub async fn can_perform_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<CapabilityCheckQuery>,
) -> ApiResult<Json<CapabilityCheckResponse>> {
    let capability = Capability::from_transport(query.capability.as_str())?;

    Ok(Json(CapabilityCheckResponse {
        allowed: state
            .authorization_service
            .can_perform(user.role(), capability),
    }))
}

pub async fn is_any_of_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<RoleMembershipQuery>,
) -> ApiResult<Json<CapabilityCheckResponse>> {
    let acceptable_roles = query
        .roles
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            Role::from_transport(value).map_err(|_| {
                AppError::Validation(format!("unknown role '{value}' in roles filter"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(CapabilityCheckResponse {
        allowed: state
            .authorization_service
            .can_perform_as_any_of(user.role(), acceptable_roles.as_slice()),
    }))
}
