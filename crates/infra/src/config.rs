//! Service configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORTFOLIO_BIND_ADDR` | `0.0.0.0:8080` |
//! | `PORTFOLIO_COMMAND_QUEUE_CAPACITY` | `1024` |
//! | `PORTFOLIO_SEED_PRODUCTS` | empty (comma-separated product identifiers) |
//! | `PORTFOLIO_LOG_FORMAT` | `json` (`json` or `pretty`) |
//! | `PORTFOLIO_LOG_LEVEL` | `info` (`RUST_LOG` overrides) |

use std::net::SocketAddr;

use thiserror::Error;

use portfolio_core::{DomainError, ProductId};
use portfolio_observability::{LogFormat, LogSettings, UnknownLogFormat};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORTFOLIO_BIND_ADDR '{value}' is not a socket address")]
    BindAddr { value: String },

    #[error("PORTFOLIO_COMMAND_QUEUE_CAPACITY '{value}' must be a positive integer")]
    QueueCapacity { value: String },

    #[error("PORTFOLIO_SEED_PRODUCTS: {0}")]
    SeedProduct(DomainError),

    #[error("PORTFOLIO_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub command_queue_capacity: usize,
    /// Products registered at startup, each receiving the default read-only charges.
    pub seed_products: Vec<ProductId>,
    pub log: LogSettings,
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("PORTFOLIO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::BindAddr { value: bind_raw.clone() })?;

        let command_queue_capacity = match lookup("PORTFOLIO_COMMAND_QUEUE_CAPACITY") {
            None => DEFAULT_COMMAND_QUEUE_CAPACITY,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::QueueCapacity { value: raw }),
            },
        };

        let seed_products = lookup("PORTFOLIO_SEED_PRODUCTS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ProductId::parse(s).map_err(ConfigError::SeedProduct))
            .collect::<Result<Vec<_>, _>>()?;

        let format = match lookup("PORTFOLIO_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };
        let level = lookup("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            bind_addr,
            command_queue_capacity,
            seed_products,
            log: LogSettings { level, format },
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            command_queue_capacity: DEFAULT_COMMAND_QUEUE_CAPACITY,
            seed_products: Vec::new(),
            log: LogSettings::default(),
        }
    }
}
