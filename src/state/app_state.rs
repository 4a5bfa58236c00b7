use std::sync::Arc;

use crate::config::app_config::AppConfig;
use crate::services::qr_service::QrGenerator;
use crate::utils::jwt::Authorizer;

pub struct AppState {
    pub config: AppConfig,
    pub authorizer: Box<dyn Authorizer>,
    // Shared with blocking generation tasks.
    pub generator: Arc<dyn QrGenerator>,
}
