//! Server configuration
//!
//! Read once from the environment at startup.

use crate::models::UnitSystem;

/// Environment variable selecting the unit system used when a tool call omits one
pub const DEFAULT_UNIT_SYSTEM_VAR: &str = "TMB_DEFAULT_UNIT_SYSTEM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServerConfig {
    pub default_unit_system: UnitSystem,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_unit_system = match lookup(DEFAULT_UNIT_SYSTEM_VAR) {
            None => UnitSystem::default(),
            Some(value) => UnitSystem::from_str(&value).unwrap_or_else(|| {
                tracing::warn!(
                    "{}='{}' is not metric or imperial; using metric",
                    DEFAULT_UNIT_SYSTEM_VAR,
                    value
                );
                UnitSystem::Metric
            }),
        };

        Self { default_unit_system }
    }
}
