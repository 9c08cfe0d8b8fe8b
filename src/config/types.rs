use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LoggingConfig;
use super::services::{HttpConfig, ImageConfig, NavigationConfig, ServicesConfig};
use super::storage::StorageConfig;

/// Prefix of environment variables that override the YAML file,
/// e.g. `SEOLMA_HTTP__TIMEOUT_IN_MS=5000`.
pub const ENV_PREFIX: &str = "SEOLMA_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: service endpoints, transport policy, session storage, logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub services: ServicesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub session: StorageConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error loading configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

fn extract(figment: Figment) -> Result<ConfigV1, ConfigError> {
    let config = figment.extract::<Config>().map_err(Box::new)?;
    match config {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load config from a YAML file, then let `SEOLMA_*` environment variables override it.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, ConfigError> {
    let figment = Figment::new()
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Load config from an in-memory YAML document (no environment overrides).
pub fn load_config_str(yaml: &str) -> Result<ConfigV1, ConfigError> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::gateway::Service;

    const MINIMAL: &str = r#"
version: "1.0.0"
services:
  user: http://localhost:8080/
  product: http://localhost:8080
  coupon: http://localhost:8081
  order: http://localhost:8080
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load_config_str(MINIMAL).expect("minimal config should parse");
        assert_eq!(config.http.timeout_in_ms, 30_000);
        assert!(config.http.include_credentials);
        assert!(!config.session.persistent);
        assert_eq!(config.navigation.login_path, "/login");
        assert!(!config.images.use_proxy);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.services.base_url(Service::User),
            "http://localhost:8080"
        );
        assert_eq!(
            config.services.base_url(Service::Coupon),
            "http://localhost:8081"
        );
    }

    #[test]
    fn test_file_storage_backend() {
        let yaml = format!(
            "{}session:\n  persistent: true\n  type: file\n  path: /tmp/seolma/session.json\n",
            MINIMAL
        );
        let config = load_config_str(&yaml).expect("config should parse");
        assert!(config.session.persistent);
        match config.session.backend {
            Some(StorageBackend::File(file)) => {
                assert_eq!(file.path.to_str(), Some("/tmp/seolma/session.json"))
            }
            None => panic!("expected a file backend"),
        }
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let yaml = MINIMAL.replace("1.0.0", "9.9.9");
        assert!(load_config_str(&yaml).is_err());
    }
}
