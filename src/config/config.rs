use serde::Deserialize;
use std::env;
use std::fs;
use toml::de::Error as TomlError;

use crate::config;

pub(crate) const CONFIG_DIR_VARIABLE: &str = "OMNIBOARD_LAUNCHER_CONFIG_DIR";
pub(crate) const DEFAULT_URL_VARIABLE: &str = "MONGO_DEFAULT_URL";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) mongo: config::mongo::Mongo,
    pub(crate) omniboard: config::omniboard::Omniboard,
    pub(crate) engine: config::engine::Engine,
    pub(crate) api: config::api::Api,
}

impl Config {
    pub(crate) fn get_api_url(&self) -> String {
        format!("http://{}:{}", self.api.host, self.api.port)
    }

    fn with_env_override(mut self, default_url: Option<String>) -> Self {
        if let Some(url) = default_url.filter(|url| !url.trim().is_empty()) {
            debug!("Default MongoDB URL taken from {}", DEFAULT_URL_VARIABLE);
            self.mongo.default_url = url;
        }
        self
    }
}

pub(crate) fn get_config_dir() -> String {
    match env::var_os(CONFIG_DIR_VARIABLE) {
        Some(variable) => variable.to_string_lossy().into_owned(),
        None => format!(
            "{}/.config/omniboard-launcher",
            env::var("HOME").unwrap_or_else(|_| ".".to_string())
        ),
    }
}

pub(crate) fn parse_config(contents: &str) -> Result<Config, TomlError> {
    toml::from_str(contents)
}

pub(crate) fn load_config() -> Config {
    let file = format!("{}/config.toml", get_config_dir());

    debug!("load config file {}", file);

    let config = match fs::read_to_string(&file) {
        Ok(contents) => match parse_config(&contents) {
            Ok(config) => config,
            Err(err) => {
                error!("Error while deserializing the TOML file : {}", err);
                Config::default()
            }
        },
        Err(_) => {
            debug!("Switch to default configuration");
            Config::default()
        }
    };

    config.with_env_override(env::var(DEFAULT_URL_VARIABLE).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.mongo.port, 27017);
        assert_eq!(config.omniboard.port_base, 20000);
        assert_eq!(config.omniboard.port_span, 10000);
        assert_eq!(config.engine.liveness_timeout_secs, 8);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = parse_config(
            r#"
            [omniboard]
            port_base = 5000
            port_span = 1000

            [api]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.omniboard.port_base, 5000);
        assert_eq!(config.omniboard.port_span, 1000);
        assert_eq!(config.omniboard.image, "vivekratnavel/omniboard");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.get_api_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(parse_config("[mongo]\nport = \"not a number\"").is_err());
    }

    #[test]
    fn test_env_override_for_default_url() {
        let config = Config::default().with_env_override(Some("mongodb://db.example.com:27017/".to_string()));
        assert_eq!(config.mongo.default_url, "mongodb://db.example.com:27017/");

        let config = Config::default().with_env_override(Some("  ".to_string()));
        assert_eq!(config.mongo.default_url, "mongodb://localhost:27017/");
    }
}
