use serde::Deserialize;

/// Timeouts, in seconds, applied to docker invocations.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct Engine {
    pub(crate) liveness_timeout_secs: u64,
    pub(crate) command_timeout_secs: u64,
    pub(crate) publish_check_timeout_secs: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            liveness_timeout_secs: 8,
            command_timeout_secs: 10,
            publish_check_timeout_secs: 5,
        }
    }
}
