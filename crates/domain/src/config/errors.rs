#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("No resolvers configured: pass -r, list [walk].resolvers, or add nameservers to /etc/resolv.conf")]
    NoResolvers,
}
