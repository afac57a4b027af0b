use std::sync::Arc;

use crate::application::services::{ChatService, ExportService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub export_service: Arc<ExportService>,
    pub settings: Settings,
}
