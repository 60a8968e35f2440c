use crate::dns_record::{RecordType, TlsaRecord};
use crate::errors::FormatError;

/// `usage | selector | matching type | certificate association data`
pub fn parse(rdata: &[u8]) -> Result<TlsaRecord, FormatError> {
    match rdata {
        [usage, selector, matching_type, data @ ..] => Ok(TlsaRecord {
            usage: *usage,
            selector: *selector,
            matching_type: *matching_type,
            data: data.to_vec(),
        }),
        _ => Err(FormatError::InsufficientData {
            record_type: RecordType::TLSA,
            needed: 3,
            actual: rdata.len(),
        }),
    }
}
