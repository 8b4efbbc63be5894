pub mod errors;
pub mod logging;
pub mod root;
pub mod walk;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use walk::{TimeoutPolicy, WalkConfig, WalkSettings};
