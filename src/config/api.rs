use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct Api {
    pub(crate) host: String,
    pub(crate) port: u16,
    /// Budget for requests that never reach the container engine.
    pub(crate) request_timeout_secs: u64,
}

impl Default for Api {
    fn default() -> Self {
        Api {
            host: "127.0.0.1".to_string(),
            port: 3030,
            request_timeout_secs: 10,
        }
    }
}
