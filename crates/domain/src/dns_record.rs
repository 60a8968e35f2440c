mod decoded;
mod record;
mod record_type;

pub use decoded::{CaaRecord, DecodedRecord, MxRecord, TlsaRecord};
pub use record::RawRecord;
pub use record_type::RecordType;

/// Result of one blocking resolution: every record decoded, in resolver
/// order, or the first failure.
pub type ResolutionOutcome = Result<Vec<DecodedRecord>, crate::errors::DomainError>;
