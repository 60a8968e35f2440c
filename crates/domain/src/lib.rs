//! rrbridge domain layer: record types, decoded values, RDATA decoders,
//! errors and configuration.
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod rdata;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_protocol::DnsProtocol;
pub use dns_query::DnsQuery;
pub use dns_record::{
    CaaRecord, DecodedRecord, MxRecord, RawRecord, RecordType, ResolutionOutcome, TlsaRecord,
};
pub use errors::{DomainError, FormatError};
