//! Configuration schema definitions.
//!
//! The proxy takes no configuration file; every section carries fixed
//! defaults and the listening port from the command line is spliced into
//! them at startup.

use serde::{Deserialize, Serialize};

/// User-Agent value forced onto every rebuilt upstream request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:10.0.3) Gecko/20120305 Firefox/10.0.3";

/// Root configuration for the forward proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Object cache sizing.
    pub cache: CacheConfig,

    /// Upstream request rewriting settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Defaults with the listening port replaced.
    pub fn for_port(port: u16) -> Self {
        let mut config = Self::default();
        config.listener.bind_address = format!("0.0.0.0:{}", port);
        config
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 1_024,
        }
    }
}

/// Timeout configuration.
///
/// The relay loop itself carries no total deadline: a response may
/// legitimately stream for a long time, and cutting it off mid-body would
/// corrupt what the client sees.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for reading the client's request line and headers, in seconds.
    pub client_header_secs: u64,

    /// How long shutdown waits for in-flight connections to finish.
    pub drain_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            client_header_secs: 10,
            drain_secs: 10,
        }
    }
}

/// Object cache sizing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Largest response body eligible for caching, in bytes.
    pub max_object_size: usize,

    /// Total capacity across all cached bodies, in bytes.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_object_size: 102_400,
            capacity: 1_049_000,
        }
    }
}

/// Upstream request rewriting settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User-Agent value for outbound requests.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_cache_constants() {
        let config = ProxyConfig::default();
        assert_eq!(config.cache.max_object_size, 102_400);
        assert_eq!(config.cache.capacity, 1_049_000);
        assert!(config.cache.max_object_size <= config.cache.capacity);
    }

    #[test]
    fn for_port_overrides_bind_address() {
        let config = ProxyConfig::for_port(9151);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9151");
    }
}
