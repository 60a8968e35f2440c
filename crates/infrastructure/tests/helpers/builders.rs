#![allow(dead_code)]
use rrbridge_domain::ResolverConfig;

pub struct ResolverConfigBuilder {
    config: ResolverConfig,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig {
                upstream_servers: Vec::new(),
                query_timeout_ms: 2000,
                poll_interval_ms: 10,
                worker_threads: 1,
            },
        }
    }

    pub fn upstream(mut self, server: impl Into<String>) -> Self {
        self.config.upstream_servers.push(server.into());
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.config.query_timeout_ms = timeout;
        self
    }

    pub fn build(self) -> ResolverConfig {
        self.config
    }
}

pub fn wire_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

pub fn caa_rdata(flags: u8, tag: &str, value: &[u8]) -> Vec<u8> {
    let mut out = vec![flags, tag.len() as u8];
    out.extend_from_slice(tag.as_bytes());
    out.extend_from_slice(value);
    out
}
