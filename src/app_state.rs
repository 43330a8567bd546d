use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::automation::AutomationClient;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub automation: Arc<AutomationClient>,
}

impl AppState {
    pub fn new(config: AppConfig, automation: AutomationClient) -> Self {
        Self {
            config: Arc::new(config),
            automation: Arc::new(automation),
        }
    }
}
