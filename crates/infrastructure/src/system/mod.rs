pub mod resolv_conf;

pub use resolv_conf::{nameservers, resolvers_from_file, system_resolvers, RESOLV_CONF_PATH};
