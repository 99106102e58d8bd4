// --- File: crates/atende_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones: built-in defaults, an
/// optional config file (`ATENDE_CONFIG`, falling back to `config/default`),
/// then `ATENDE_`-prefixed environment variables with `__` as the nesting
/// separator (`ATENDE_API__BASE_URL`, `ATENDE_STORAGE__DIR`, ...). A `.env`
/// file is honored if present.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();
    let config_path =
        std::env::var("ATENDE_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    Config::builder()
        .set_default("api.base_url", "http://localhost:3333")?
        .set_default("storage.dir", ".atende")?
        .add_source(File::with_name(&config_path).required(false))
        .add_source(Environment::with_prefix("ATENDE").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_a_complete_config() {
        let config = load_config().unwrap();
        assert!(!config.api.base_url.is_empty());
        assert!(!config.storage.dir.is_empty());
        assert!(config.api.timeout_secs.is_none());
    }
}
