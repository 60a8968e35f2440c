use super::errors::ConfigError;
use crate::dns_protocol::DnsProtocol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Tried in order; the next one is used only when the previous fails.
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-upstream attempt timeout. The blocking bridge has no timer of its
    /// own, so this is the only deadline a resolve call is subject to.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// How long one event-processing step waits for a completion.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

impl ResolverConfig {
    pub fn endpoints(&self) -> Result<Vec<DnsProtocol>, ConfigError> {
        self.upstream_servers
            .iter()
            .map(|s| s.parse::<DnsProtocol>().map_err(ConfigError::InvalidUpstream))
            .collect()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout_ms: default_query_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            worker_threads: default_worker_threads(),
        }
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec!["udp://1.1.1.1:53".to_string(), "udp://8.8.8.8:53".to_string()]
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_worker_threads() -> usize {
    2
}
