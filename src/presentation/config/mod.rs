mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExportSettings, ExportSourceSetting, LlmProvider, LlmSettings, LoggingSettings,
    ServerSettings, Settings, SettingsError, StorageSettings, UploadSettings,
};
