use serde::Deserialize;

use crate::models::connection::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct Mongo {
    /// Used when the URI mode is submitted without a URL.
    pub(crate) default_url: String,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) timeout_secs: u64,
}

impl Default for Mongo {
    fn default() -> Self {
        Mongo {
            default_url: format!("mongodb://{}:{}/", DEFAULT_HOST, DEFAULT_PORT),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: 3,
        }
    }
}
