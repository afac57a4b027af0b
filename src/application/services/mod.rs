mod chat_controller;
mod chat_service;
mod export_service;
mod inference_service;
mod prompt_builder;
mod session_store;

pub use chat_controller::{
    ChatEffect, ChatEvent, ChatMode, ChatState, Notification, NotificationLevel, RequestId,
    transition,
};
pub use chat_service::{ChatService, ChatServiceError, SendOutcome};
pub use export_service::{
    EXPORT_ARCHIVE_NAME, EXPORT_PATHS, ExportArchive, ExportError, ExportService,
    placeholder_for,
};
pub use inference_service::{
    ANSWER_FALLBACK, InferenceError, InferenceService, SUMMARY_FALLBACK, with_fallback,
};
pub use prompt_builder::{build_answer_prompt, build_summary_prompt};
pub use session_store::SessionStore;
