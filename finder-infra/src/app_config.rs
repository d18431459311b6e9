use serde::Deserialize;
use std::env;

const TEST_BASE_URL: &str = "https://test.api.amadeus.com";
const PRODUCTION_BASE_URL: &str = "https://api.amadeus.com";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub amadeus: AmadeusConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// `test` or `production`.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Overrides the URL derived from `hostname`.
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }
fn default_hostname() -> String { "test".to_string() }
fn default_timeout_seconds() -> u64 { 20 }

impl AmadeusConfig {
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        match self.hostname.as_str() {
            "production" => PRODUCTION_BASE_URL.to_string(),
            _ => TEST_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_layered("config", &run_mode, config::Environment::with_prefix("FINDER").separator("__"))
    }

    /// Files under `dir` in increasing priority, then `environment` on top.
    pub fn load_layered(
        dir: &str,
        run_mode: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local file with credentials, never checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg.. `FINDER__AMADEUS__CLIENT_ID=abc` sets `amadeus.client_id`
            .add_source(environment)
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.amadeus.client_id.trim().is_empty() || self.amadeus.client_secret.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "amadeus.client_id and amadeus.client_secret must be set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("Failed to deserialize config")
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(
            r#"
            [server]
            [amadeus]
            client_id = "id"
            client_secret = "secret"
            "#,
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.amadeus.timeout_seconds, 20);
        assert_eq!(config.amadeus.base_url(), TEST_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_hostname_and_override() {
        let mut config = parse(
            r#"
            [server]
            port = 8080
            [amadeus]
            client_id = "id"
            client_secret = "secret"
            hostname = "production"
            "#,
        );
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.amadeus.base_url(), PRODUCTION_BASE_URL);

        config.amadeus.base_url = Some("http://127.0.0.1:9000/".to_string());
        assert_eq!(config.amadeus.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = parse(
            r#"
            [server]
            [amadeus]
            client_id = ""
            "#,
        );
        assert!(config.validate().is_err());
    }

    fn finder_env(vars: &[(&str, &str)]) -> config::Environment {
        config::Environment::with_prefix("FINDER")
            .separator("__")
            .source(Some(
                vars.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ))
    }

    fn write_config_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).expect("Failed to write config file");
        }
        dir
    }

    const DEFAULT_TOML: &str = r#"
        [server]
        port = 5000
        [amadeus]
        client_id = "file-id"
        client_secret = "file-secret"
    "#;

    #[test]
    fn test_layers_override_in_order() {
        let dir = write_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("staging.toml", "[server]\nport = 6000\n"),
            ("local.toml", "[amadeus]\nclient_secret = \"local-secret\"\n"),
        ]);
        let path = dir.path().to_str().expect("utf-8 path");

        let config = Config::load_layered(path, "staging", finder_env(&[]))
            .expect("Failed to load config");
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.amadeus.client_id, "file-id");
        assert_eq!(config.amadeus.client_secret, "local-secret");
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = write_config_dir(&[("default.toml", DEFAULT_TOML)]);
        let path = dir.path().to_str().expect("utf-8 path");

        let config = Config::load_layered(
            path,
            "development",
            finder_env(&[
                ("FINDER__AMADEUS__CLIENT_ID", "env-id"),
                ("FINDER__AMADEUS__HOSTNAME", "production"),
                ("OTHER__AMADEUS__CLIENT_SECRET", "ignored"),
            ]),
        )
        .expect("Failed to load config");

        assert_eq!(config.amadeus.client_id, "env-id");
        assert_eq!(config.amadeus.client_secret, "file-secret");
        assert_eq!(config.amadeus.base_url(), PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_missing_default_file_is_an_error() {
        let dir = write_config_dir(&[]);
        let path = dir.path().to_str().expect("utf-8 path");
        assert!(Config::load_layered(path, "development", finder_env(&[])).is_err());
    }

    #[test]
    fn test_empty_credentials_fail_load() {
        let dir = write_config_dir(&[("default.toml", DEFAULT_TOML)]);
        let path = dir.path().to_str().expect("utf-8 path");
        let result = Config::load_layered(
            path,
            "development",
            finder_env(&[("FINDER__AMADEUS__CLIENT_ID", " ")]),
        );
        assert!(result.is_err());
    }
}
