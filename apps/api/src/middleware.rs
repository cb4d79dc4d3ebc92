use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use orgdesk_core::{AppError, OrganizationId, UserIdentity};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Authenticates the UI gateway and materializes the forwarded identity.
///
/// The gateway terminates end-user authentication; this service trusts it
/// via a shared bearer token and reads the acting user from forwarded
/// headers.
pub async fn require_gateway_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let headers = request.headers();

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("missing gateway bearer token".to_owned()))?;

    if token != state.gateway_token {
        return Err(AppError::Unauthorized("invalid gateway bearer token".to_owned()).into());
    }

    let subject = required_header(headers, "x-actor-subject")?;
    let display_name = headers
        .get("x-actor-name")
        .and_then(|value| value.to_str().ok())
        .unwrap_or(subject.as_str())
        .to_owned();
    let organization_id = required_header(headers, "x-organization-id")?;
    let organization_id = Uuid::parse_str(organization_id.as_str())
        .map(OrganizationId::from_uuid)
        .map_err(|error| {
            ApiError(AppError::Unauthorized(format!(
                "invalid x-organization-id header: {error}"
            )))
        })?;

    let identity = UserIdentity::new(subject, display_name, organization_id);
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError(AppError::Unauthorized(format!("missing {name} header"))))
}
