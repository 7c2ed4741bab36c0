use std::fmt;

#[derive(Debug)]
pub enum RuntimeError {
    /// The engine did not answer either liveness query. Never auto-remediated.
    EngineUnavailable(String),
    /// A single engine invocation failed, exited non-zero or timed out.
    EngineOperation(String),
    PortsExhausted(u16),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EngineUnavailable(msg) => write!(f, "Docker is not reachable: {}", msg),
            RuntimeError::EngineOperation(msg) => write!(f, "Docker command failed: {}", msg),
            RuntimeError::PortsExhausted(start) => {
                write!(f, "No free host port found between {} and {}", start, u16::MAX)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

impl RuntimeError {
    pub(crate) fn is_engine_unavailable(&self) -> bool {
        matches!(self, RuntimeError::EngineUnavailable(_))
    }
}
