use ip6walk_domain::{CliOverrides, Config, ConfigError, WalkConfig};
use ip6walk_infrastructure::system::system_resolvers;
use tracing::debug;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Resolvers from the command line or config file win; `/etc/resolv.conf`
/// is only read when neither lists any.
pub fn walk_config(config: &Config) -> Result<WalkConfig, ConfigError> {
    let system = if config.walk.resolvers.is_empty() {
        let servers = system_resolvers();
        debug!(count = servers.len(), "Using system resolvers");
        servers
    } else {
        Vec::new()
    };
    config.to_walk_config(&system)
}
