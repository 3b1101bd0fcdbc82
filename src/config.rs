use config as config_rs;
use thiserror::Error;

/// Runtime settings for the service, layered from built-in defaults,
/// environment variables, and CLI overrides (highest precedence).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub max_file_bytes: usize,
    pub noise_count: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

pub fn load_config(port_override: Option<u16>) -> Result<ServerConfig, ConfigError> {
    let mut builder = config_rs::Config::builder()
        .set_default("port", 3001i64)?
        .set_default("max_file_bytes", 5i64 * 1024 * 1024)?
        .set_default("noise_count", 5i64)?;

    if let Ok(port) = std::env::var("PORT") {
        builder = builder.set_override("port", port)?;
    }
    if let Ok(cap) = std::env::var("SCRIPTCLOAK_MAX_FILE_BYTES") {
        builder = builder.set_override("max_file_bytes", cap)?;
    }
    if let Ok(count) = std::env::var("SCRIPTCLOAK_NOISE_COUNT") {
        builder = builder.set_override("noise_count", count)?;
    }

    // CLI flags take precedence
    if let Some(port) = port_override {
        builder = builder.set_override("port", i64::from(port))?;
    }

    let cfg = builder.build()?;

    Ok(ServerConfig {
        port: cfg.get::<u16>("port")?,
        max_file_bytes: cfg.get::<usize>("max_file_bytes")?,
        noise_count: cfg.get::<usize>("noise_count")?,
    })
}
