use orgdesk_application::EditLockService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub edit_lock_service: EditLockService,
    pub gateway_token: String,
    pub frontend_url: String,
}
