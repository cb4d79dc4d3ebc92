use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use orgdesk_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub(crate) fn build_router(app_state: AppState) -> Result<Router, AppError> {
    let allowed_origin = app_state
        .frontend_url
        .parse::<HeaderValue>()
        .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

    let cors_layer = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let protected_routes = Router::new()
        .route(
            "/api/edit-locks/requests",
            post(handlers::edit_lock::request_access_handler),
        )
        .route(
            "/api/edit-locks/active",
            get(handlers::edit_lock::active_lease_handler),
        )
        .route(
            "/api/edit-locks/can-edit",
            get(handlers::edit_lock::can_edit_handler),
        )
        .route(
            "/api/edit-locks/{lease_id}/resolve",
            post(handlers::edit_lock::resolve_handler),
        )
        .route(
            "/api/edit-locks/{lease_id}/complete",
            post(handlers::edit_lock::complete_handler),
        )
        .route(
            "/api/edit-locks/{lease_id}",
            delete(handlers::edit_lock::cancel_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_gateway_identity,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
