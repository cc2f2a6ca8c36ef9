use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::DEFAULT_TOP_K;

pub const CONFIG_PATH_ENV: &str = "DOCRAG_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub embeddings: EmbeddingsSettings,
    pub llm: LlmSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Local,
    S3,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub local_path: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub base_url: String,
    pub model: String,
    /// Vector dimension the index is pinned to; 0 lets the first upsert decide.
    pub dimension: usize,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 120,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            local_path: "./data/buckets".to_string(),
            s3_region: None,
            s3_endpoint: None,
        }
    }
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimension: 0,
            api_key: None,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: crate::application::services::DEFAULT_MAX_TOKENS,
            api_key: None,
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: crate::infrastructure::text_processing::DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,docrag=debug,tower_http=debug".to_string(),
            json_format: false,
        }
    }
}

impl Settings {
    /// Loads the TOML file named by `DOCRAG_CONFIG` (default
    /// `config/default.toml`), applies environment overrides and validates.
    /// A missing default file falls back to built-in defaults; a missing file
    /// named explicitly is an error.
    pub fn load() -> Result<Self, SettingsError> {
        let explicit_path = std::env::var(CONFIG_PATH_ENV).ok();
        let path = explicit_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut settings = if explicit_path.is_some() || Path::new(&path).exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// `OPENAI_API_KEY` fills any API key the file leaves unset;
    /// `SERVER_PORT` replaces the configured port.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.embeddings.api_key.get_or_insert_with(|| api_key.clone());
            self.llm.api_key.get_or_insert(api_key);
        }

        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.chunking.chunk_size == 0 {
            return Err(SettingsError::Invalid {
                field: "chunking.chunk_size",
                reason: "must be at least 1 word".to_string(),
            });
        }
        if self.retrieval.top_k == 0 {
            return Err(SettingsError::Invalid {
                field: "retrieval.top_k",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.llm.max_tokens == 0 {
            return Err(SettingsError::Invalid {
                field: "llm.max_tokens",
                reason: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}
