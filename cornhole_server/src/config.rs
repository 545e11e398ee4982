//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use cornhole::{BracketConfig, tournament::events::DEFAULT_EVENT_CAPACITY};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Default HTTP bind address
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 8000));

/// Rules page served when `RULES_TEXT` is unset
pub const DEFAULT_RULES: &str = "<h3>Cornhole rules</h3>\
<ul>\
<li>Boards sit 27 feet apart, front edge to front edge.</li>\
<li>Each player throws four bags per inning, alternating with the opponent.</li>\
<li>A bag in the hole scores 3 points, a bag on the board scores 1.</li>\
<li>Cancellation scoring: only the difference between both sides counts each inning.</li>\
<li>First team to 21 at the end of an inning wins. Games cannot end in a tie.</li>\
</ul>";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus exporter address (exporter disabled when unset)
    pub metrics_bind: Option<SocketAddr>,
    /// Roster and join code settings
    pub bracket: BracketConfig,
    /// Buffered events per WebSocket subscriber
    pub event_channel_capacity: usize,
    /// HTML served by the rules page
    pub rules_text: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `metrics_bind_override` - Optional metrics address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_env_or("SERVER_BIND", DEFAULT_BIND)?,
        };

        let metrics_bind = match metrics_bind_override {
            Some(addr) => Some(addr),
            None => match std::env::var("METRICS_BIND") {
                Ok(v) if !v.trim().is_empty() => {
                    Some(v.trim().parse().map_err(|_| ConfigError::Invalid {
                        var: "METRICS_BIND".to_string(),
                        reason: format!("'{v}' is not a socket address"),
                    })?)
                }
                _ => None,
            },
        };

        let defaults = BracketConfig::default();
        let bracket = BracketConfig {
            roster_cap: parse_env_or("ROSTER_CAP", defaults.roster_cap)?,
            join_code_length: parse_env_or("JOIN_CODE_LENGTH", defaults.join_code_length)?,
        };

        let rules_text = match std::env::var("RULES_TEXT") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => DEFAULT_RULES.to_string(),
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            bracket,
            event_channel_capacity: parse_env_or(
                "EVENT_CHANNEL_CAPACITY",
                DEFAULT_EVENT_CAPACITY,
            )?,
            rules_text,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bracket.validate().map_err(|e| ConfigError::Invalid {
            var: match e {
                cornhole::config::ConfigError::RosterCapZero => "ROSTER_CAP",
                cornhole::config::ConfigError::JoinCodeLength(_) => "JOIN_CODE_LENGTH",
            }
            .to_string(),
            reason: e.to_string(),
        })?;

        if self.event_channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "EVENT_CHANNEL_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an environment variable, falling back to `default` when unset or blank
///
/// A value that is set but does not parse is an error rather than a silent default.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{raw}' could not be parsed"),
            })
        }
        _ => Ok(default),
    }
}
