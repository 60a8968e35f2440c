use clap::{Parser, Subcommand};
use rrbridge_domain::{CliOverrides, DnsQuery, DomainError, RecordType};
use rrbridge_infrastructure::dns::ResolverStatus;
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "rrbridge")]
#[command(version)]
#[command(about = "Resolve DNS records and decode their RDATA")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Upstream server (udp://IP:PORT, tcp://IP:PORT or IP:PORT); repeatable
    #[arg(long = "upstream", value_name = "ADDR", global = true)]
    upstreams: Vec<String>,

    /// Per-upstream query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve NAME and print the decoded records
    Resolve {
        name: String,

        /// Record type (A, AAAA, MX, CAA, TXT, NS, CNAME, PTR, TLSA)
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,

        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        upstream_servers: cli.upstreams,
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let services = di::Services::new(&config)?;

    match cli.command {
        Command::Resolve {
            name,
            record_type,
            json,
        } => {
            let query = DnsQuery::new(name, record_type);
            info!(query = %query, "Resolving");

            let records = services
                .resolve
                .execute(&query)
                .map_err(|e| explain(e, &query))?;

            let stdout = std::io::stdout();
            output::print_records(&mut stdout.lock(), &query, &records, json)?;
        }
    }

    Ok(())
}

fn explain(error: DomainError, query: &DnsQuery) -> anyhow::Error {
    let status = match &error {
        DomainError::ResolutionFailed { status, .. } => Some(*status),
        _ => None,
    };
    let error = anyhow::Error::new(error);
    match status {
        Some(status) => error.context(format!(
            "{} ({})",
            query,
            ResolverStatus::describe(status)
        )),
        None => error.context(format!("Failed to resolve {}", query)),
    }
}
