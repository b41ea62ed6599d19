use std::collections::BTreeMap;
use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub instance: InstanceConfig,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecurityConfig {
    /// Sign tokens with the fixed development key. Never enable in production:
    /// the key is public, so anyone can forge tokens.
    #[serde(default)]
    pub development_mode: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InstanceConfig {
    pub name: Option<String>,
}

/// User record seeding the in-memory user store.
#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    pub name: String,
    /// Argon2 hash in PHC string format
    pub password_hash: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "default_user_source")]
    pub source: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_user_source() -> String {
    "local".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CLOUD_MANAGER__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `RUN_MODE` defaults to production, so the development layer and its
    /// fixed signing key are only used when asked for by name.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = run_mode();

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: CLOUD_MANAGER__SECURITY__DEVELOPMENT_MODE=false overrides
            // security.development_mode
            .add_source(Environment::with_prefix("CLOUD_MANAGER").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

pub const DEFAULT_RUN_MODE: &str = "production";

/// Name of the environment-specific config layer.
pub fn run_mode() -> String {
    env::var("RUN_MODE")
        .ok()
        .filter(|mode| !mode.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RUN_MODE.to_string())
}
