use crate::dns_record::RecordType;
use thiserror::Error;

/// RDATA that violates the wire layout of its record type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("{record_type} RDATA must be exactly {expected} bytes, got {actual}")]
    InvalidLength {
        record_type: RecordType,
        expected: usize,
        actual: usize,
    },

    #[error("{record_type} RDATA truncated: need at least {needed} bytes, got {actual}")]
    InsufficientData {
        record_type: RecordType,
        needed: usize,
        actual: usize,
    },

    #[error("RFC-6844 CAA tag length {length} MUST be >= {min} AND <= {max}")]
    CaaTagLength { length: u8, min: u8, max: u8 },

    #[error("RFC-6844 CAA tag MUST only contain US-ASCII characters (byte 0x{byte:02x} at offset {offset})")]
    CaaTagNotAscii { byte: u8, offset: usize },

    #[error("TXT character-string at offset {offset} declares {declared} bytes, only {available} remain")]
    CharacterStringOverrun {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("Malformed domain name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("{record_type} RDATA has {count} trailing bytes")]
    TrailingData { record_type: RecordType, count: usize },
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported record type code: {0}")]
    UnsupportedRecordType(u16),

    #[error("Resolution of {name} {record_type} failed with resolver status {status}")]
    ResolutionFailed {
        name: String,
        record_type: RecordType,
        status: i32,
    },

    #[error("Malformed {record_type} record for {name}: {source}")]
    MalformedRecord {
        name: String,
        record_type: RecordType,
        #[source]
        source: FormatError,
    },

    #[error("Resolution of {name} {record_type} was cancelled")]
    Cancelled { name: String, record_type: RecordType },

    #[error("Resolver dropped the query for {name} without completing it")]
    QueryAbandoned { name: String },

    #[error("Completion carried token {received}, expected {expected}")]
    TokenMismatch { expected: u64, received: u64 },

    #[error("Resolver context error: {0}")]
    Context(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport I/O error with {server}: {message}")]
    TransportIo { server: String, message: String },

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for the failures a caller of `resolve` sees as a resolution error:
    /// a non-success resolver status or a record that failed to decode.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            DomainError::ResolutionFailed { .. } | DomainError::MalformedRecord { .. }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled { .. })
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportIo { .. }
                | DomainError::TransportAllServersUnreachable
        )
    }
}
