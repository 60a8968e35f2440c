use super::name::read_name;
use crate::dns_record::{MxRecord, RecordType};
use crate::errors::FormatError;

/// `PREFERENCE (u16, big-endian) | EXCHANGE (domain name)`
pub fn parse(rdata: &[u8]) -> Result<MxRecord, FormatError> {
    let priority = match rdata {
        [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        _ => {
            return Err(FormatError::InsufficientData {
                record_type: RecordType::MX,
                needed: 2,
                actual: rdata.len(),
            })
        }
    };

    let (exchange, end) = read_name(rdata, 2)?;
    if end != rdata.len() {
        return Err(FormatError::TrailingData {
            record_type: RecordType::MX,
            count: rdata.len() - end,
        });
    }

    Ok(MxRecord { priority, exchange })
}
