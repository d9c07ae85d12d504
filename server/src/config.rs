//! Runtime configuration read from the environment.

use larder_core::chart::MIN_SIDE;
use larder_core::ChartConfig;
use std::env;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub chart: ChartConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let defaults = ChartConfig::default();
        let chart = ChartConfig {
            width: chart_side(&lookup, "CHART_WIDTH", defaults.width)?,
            height: chart_side(&lookup, "CHART_HEIGHT", defaults.height)?,
        };

        Ok(Config {
            database_url,
            bind_addr,
            chart,
        })
    }
}

fn chart_side(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: value.clone(),
        reason,
    };
    let side: u32 = value.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
    if !(MIN_SIDE..=4096).contains(&side) {
        return Err(invalid(format!("must be between {} and 4096", MIN_SIDE)));
    }
    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "larder.db")])).unwrap();
        assert_eq!(config.database_url, "larder.db");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_chart_size_overrides_and_bounds() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "x.db"),
            ("CHART_WIDTH", "800"),
            ("CHART_HEIGHT", "500"),
        ]))
        .unwrap();
        assert_eq!(
            config.chart,
            ChartConfig {
                width: 800,
                height: 500
            }
        );

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "x.db"),
            ("CHART_WIDTH", "10"),
        ]));
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                name: "CHART_WIDTH",
                ..
            })
        ));

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "x.db"),
            ("CHART_HEIGHT", "tall"),
        ]));
        assert!(err.is_err());
    }
}
