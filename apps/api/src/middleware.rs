use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use civicwatch_core::AppError;
use civicwatch_domain::{Role, UserIdentity};

use crate::error::ApiResult;

/// Header carrying the authenticated subject, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated role, set by the upstream gateway.
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Optional header carrying a display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub fn identity_from_headers(headers: &HeaderMap) -> Result<UserIdentity, AppError> {
    let subject = header_value(headers, USER_ID_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let role = header_value(headers, USER_ROLE_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authenticated role required".to_owned()))?;
    let role = Role::from_transport(role)?;

    let identity = UserIdentity::new(subject, role);
    Ok(match header_value(headers, USER_NAME_HEADER) {
        Some(display_name) => identity.with_display_name(display_name),
        None => identity,
    })
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
