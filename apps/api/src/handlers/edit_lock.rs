use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use orgdesk_core::UserIdentity;
use orgdesk_domain::LeaseTarget;
use uuid::Uuid;

use crate::dto::{
    CanEditResponse, LeaseResponse, LeaseTargetQuery, RequestAccessRequest, ResolveLeaseRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn request_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<RequestAccessRequest>,
) -> ApiResult<(StatusCode, Json<LeaseResponse>)> {
    let lease = state
        .edit_lock_service
        .request_access(
            &user,
            LeaseTarget::new(payload.record_kind, payload.record_id),
            payload.reason,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(LeaseResponse::from(lease))))
}

pub async fn resolve_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(lease_id): Path<Uuid>,
    Json(payload): Json<ResolveLeaseRequest>,
) -> ApiResult<Json<LeaseResponse>> {
    let lease = state
        .edit_lock_service
        .resolve(&user, lease_id, payload.decision, payload.note)
        .await?;

    Ok(Json(LeaseResponse::from(lease)))
}

pub async fn cancel_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.edit_lock_service.cancel(&user, lease_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<Json<LeaseResponse>> {
    let lease = state.edit_lock_service.complete(&user, lease_id).await?;

    Ok(Json(LeaseResponse::from(lease)))
}

pub async fn active_lease_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<LeaseTargetQuery>,
) -> ApiResult<Json<Option<LeaseResponse>>> {
    let lease = state
        .edit_lock_service
        .active_lease(&user, LeaseTarget::new(query.record_kind, query.record_id))
        .await?;

    Ok(Json(lease.map(LeaseResponse::from)))
}

pub async fn can_edit_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<LeaseTargetQuery>,
) -> ApiResult<Json<CanEditResponse>> {
    let can_edit = state
        .edit_lock_service
        .can_edit(&user, LeaseTarget::new(query.record_kind, query.record_id))
        .await?;

    Ok(Json(CanEditResponse { can_edit }))
}
