//! ip6walk Infrastructure Layer
pub mod dns;
pub mod system;
