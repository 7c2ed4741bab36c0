use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// Empty or malformed connection input, raised before any I/O.
    Input(String),
    /// Timeout, refused connection, failed authentication or any other driver failure.
    Connection(String),
    /// Listing databases was denied and the URI names no database to fall back to.
    Authorization(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::Input(msg) => write!(f, "Invalid connection input: {}", msg),
            ResolverError::Connection(msg) => write!(f, "Connection Error: {}", msg),
            ResolverError::Authorization(msg) => write!(f, "Not authorized to list databases: {}", msg),
        }
    }
}

impl std::error::Error for ResolverError {}

pub(crate) fn is_authorization_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("not authorized") || lower.contains("listdatabases")
}

impl ResolverError {
    /// Short user-facing remediation text.
    pub(crate) fn hint(&self) -> String {
        match self {
            ResolverError::Input(msg) => msg.clone(),
            ResolverError::Authorization(_) => {
                "This user may not list databases. Add the database name to the connection URI path (e.g. mongodb://host:27017/mydb)."
                    .to_string()
            }
            ResolverError::Connection(msg) => {
                let lower = msg.to_lowercase();

                if lower.contains("server selection timeout") || lower.contains("timed out") {
                    "Cannot connect to MongoDB server. Please ensure MongoDB is running and the connection details are correct."
                        .to_string()
                } else if lower.contains("connection refused") {
                    "Connection refused by MongoDB server. MongoDB may not be running on this port.".to_string()
                } else if lower.contains("authentication failed") {
                    "MongoDB authentication failed. Please check your credentials.".to_string()
                } else {
                    self.to_string()
                }
            }
        }
    }
}
