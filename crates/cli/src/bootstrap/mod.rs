use anyhow::Context;
use rrbridge_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Output goes to stderr so resolved records on stdout stay machine readable.
pub fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut filter = config.logging.level.clone();
        if !filter.contains("hickory_proto") {
            filter.push_str(",hickory_proto=warn");
        }
        tracing_subscriber::EnvFilter::new(filter)
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        upstreams = ?config.resolver.upstream_servers,
        timeout_ms = config.resolver.query_timeout_ms,
        "Configuration loaded"
    );
}
