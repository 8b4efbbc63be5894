use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::walk::{TimeoutPolicy, WalkConfig, WalkSettings};
use crate::dns_protocol::DnsProtocol;

const LOCAL_CONFIG_PATH: &str = "ip6walk.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ip6walk/config.toml";

/// Main configuration structure for ip6walk
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub walk: WalkSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ip6walk.toml in current directory
    /// 3. /etc/ip6walk/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.resolvers.is_empty() {
            self.walk.resolvers = overrides.resolvers;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.walk.timeout_ms = timeout_ms;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.walk.concurrency = concurrency;
        }
        if overrides.ignore_timeout {
            self.walk.ignore_timeout = true;
        }
        if overrides.verbose {
            self.walk.verbose = true;
        }
        if overrides.no_edns {
            self.walk.edns_payload = 0;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.walk.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.walk.concurrency == 0 {
            return Err(ConfigError::Validation(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.walk.edns_payload != 0 && self.walk.edns_payload < 512 {
            return Err(ConfigError::Validation(format!(
                "edns_payload {} is below the 512 byte minimum",
                self.walk.edns_payload
            )));
        }
        for resolver in &self.walk.resolvers {
            resolver
                .parse::<DnsProtocol>()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        Ok(())
    }

    /// Freeze the settings into a [`WalkConfig`].
    ///
    /// `system_resolvers` is used only when no resolver was configured.
    pub fn to_walk_config(
        &self,
        system_resolvers: &[DnsProtocol],
    ) -> Result<WalkConfig, ConfigError> {
        self.validate()?;

        let resolvers: Vec<DnsProtocol> = if self.walk.resolvers.is_empty() {
            system_resolvers.to_vec()
        } else {
            self.walk
                .resolvers
                .iter()
                .map(|r| r.parse::<DnsProtocol>())
                .collect::<Result<_, _>>()
                .map_err(|e| ConfigError::Validation(e.to_string()))?
        };

        if resolvers.is_empty() {
            return Err(ConfigError::NoResolvers);
        }

        let edns_payload = match self.walk.edns_payload {
            0 => None,
            size => Some(size),
        };

        Ok(WalkConfig::new(resolvers)
            .with_query_timeout(Duration::from_millis(self.walk.timeout_ms))
            .with_timeout_policy(TimeoutPolicy::from_ignore_flag(self.walk.ignore_timeout))
            .with_verbose(self.walk.verbose)
            .with_concurrency(self.walk.concurrency)
            .with_edns_payload(edns_payload))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub resolvers: Vec<String>,
    pub timeout_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub ignore_timeout: bool,
    pub verbose: bool,
    pub no_edns: bool,
    pub log_level: Option<String>,
}
