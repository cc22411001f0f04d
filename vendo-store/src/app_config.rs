use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub agent: AgentConfig,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON export of the product spreadsheet, loaded at startup when present.
    pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub api_base_url: String,
    /// Without a key the agent falls back to its keyword logic.
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub gemini_model: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub verify_token: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VENDO__SERVER__PORT=9000` would set `server.port`
            .add_source(config::Environment::with_prefix("VENDO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
