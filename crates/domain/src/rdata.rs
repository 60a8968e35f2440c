//! RDATA decoders.
//!
//! Each decoder turns the raw payload of one resource record into a
//! [`DecodedRecord`]. Decoders are pure: no I/O, no shared state. Batch
//! decoding is fail-fast; one malformed buffer rejects the whole batch.

pub mod address;
pub mod caa;
pub mod mx;
pub mod name;
pub mod tlsa;
pub mod txt;

use crate::dns_record::{DecodedRecord, RawRecord, RecordType};
use crate::errors::FormatError;

/// Decodes one RDATA buffer with the decoder registered for `record_type`.
pub fn decode(record_type: RecordType, rdata: &[u8]) -> Result<DecodedRecord, FormatError> {
    match record_type {
        RecordType::A => address::parse_ipv4(rdata).map(DecodedRecord::Address),
        RecordType::AAAA => address::parse_ipv6(rdata).map(DecodedRecord::Address),
        RecordType::MX => mx::parse(rdata).map(DecodedRecord::Mx),
        RecordType::CAA => caa::parse(rdata).map(DecodedRecord::Caa),
        RecordType::NS | RecordType::CNAME | RecordType::PTR => {
            name::parse_single(record_type, rdata).map(DecodedRecord::Name)
        }
        RecordType::TXT => txt::parse(rdata).map(DecodedRecord::Txt),
        RecordType::TLSA => tlsa::parse(rdata).map(DecodedRecord::Tlsa),
    }
}

/// Decodes every buffer in order. The buffers are consumed and dropped once
/// decoded; nothing is kept.
pub fn decode_all(
    record_type: RecordType,
    records: Vec<RawRecord>,
) -> Result<Vec<DecodedRecord>, FormatError> {
    records
        .into_iter()
        .map(|record| decode(record_type, record.as_bytes()))
        .collect()
}
