//! Orgdesk API composition root.

#![forbid(unsafe_code)]

mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use orgdesk_application::{AuthorizationService, EditLockService, NotificationSink};
use orgdesk_core::AppError;
use orgdesk_infrastructure::{
    ConsoleNotificationSink, PostgresAuditRepository, PostgresAuthorizationRepository,
    PostgresLeaseRepository, PostgresNotificationRepository, PostgresRecordMetadataRepository,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let gateway_token = required_non_empty_env("GATEWAY_TOKEN")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let authorization_repository = Arc::new(PostgresAuthorizationRepository::new(pool.clone()));
    let authorization_service = AuthorizationService::new(authorization_repository);

    let notification_sink: Arc<dyn NotificationSink> = match env::var("NOTIFICATION_SINK")
        .unwrap_or_else(|_| "postgres".to_owned())
        .as_str()
    {
        "console" => Arc::new(ConsoleNotificationSink::new()),
        _ => Arc::new(PostgresNotificationRepository::new(pool.clone())),
    };

    let edit_lock_service = EditLockService::new(
        authorization_service,
        Arc::new(PostgresLeaseRepository::new(pool.clone())),
        notification_sink,
        Arc::new(PostgresAuditRepository::new(pool.clone())),
        Arc::new(PostgresRecordMetadataRepository::new(pool)),
    );

    let app_state = AppState {
        edit_lock_service,
        gateway_token,
        frontend_url,
    };
    let app = api_router::build_router(app_state)?;

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "orgdesk-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
