use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub storage: StorageConfig,
    pub insight: InsightConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// When unset the service keeps records in memory.
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub openai_api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the `uploads` namespace.
    pub root: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightConfig {
    pub persist_insights: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
                cors_allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                min_connections: 1,
            },
            llm: LLMConfig {
                provider: "openai".to_string(),
                openai_api_key: String::new(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4".to_string(),
                timeout_secs: 60,
            },
            storage: StorageConfig {
                root: PathBuf::from("."),
                max_upload_bytes: 50 * 1024 * 1024,
            },
            insight: InsightConfig {
                persist_insights: false,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| defaults.server.port.to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: match env::var("ALLOWED_ORIGINS") {
                    Ok(origins) => origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                    Err(_) => defaults.server.cors_allowed_origins,
                },
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| defaults.database.max_connections.to_string())
                    .parse()?,
                min_connections: env::var("DB_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| defaults.database.min_connections.to_string())
                    .parse()?,
            },
            llm: LLMConfig {
                provider: env::var("INSIGHT_LLM_PROVIDER").unwrap_or(defaults.llm.provider),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.llm.base_url),
                model: env::var("INSIGHT_LLM_MODEL").unwrap_or(defaults.llm.model),
                timeout_secs: env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| defaults.llm.timeout_secs.to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                root: env::var("STORAGE_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.root),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .unwrap_or_else(|_| defaults.storage.max_upload_bytes.to_string())
                    .parse()?,
            },
            insight: InsightConfig {
                persist_insights: env::var("PERSIST_INSIGHTS")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()?,
            },
        })
    }
}
