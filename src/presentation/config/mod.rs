mod settings;

pub use settings::{
    CONFIG_PATH_ENV, ChunkingSettings, DEFAULT_CONFIG_PATH, EmbeddingsSettings, LlmSettings,
    LoggingSettings, RetrievalSettings, ServerSettings, Settings, SettingsError, StorageProvider,
    StorageSettings,
};
