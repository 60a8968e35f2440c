//! Certification Authority Authorization RDATA (RFC 6844 §5.1).
//!
//! ```text
//! +----------------+----------------+
//! | Flags          | Tag Length = n |
//! +----------------+----------------+...+---------------+
//! | Tag char 0     | Tag char 1     |...| Tag char n-1  |
//! +----------------+----------------+...+---------------+
//! | Value byte 0   | Value byte 1   |.....| Value byte m-1 |
//! +----------------+----------------+.....+----------------+
//! ```
//!
//! The value has no length prefix: it runs to the end of the RDATA. Tag
//! values are not interpreted (`issue`, `iodef` and friends are opaque here).

use crate::dns_record::{CaaRecord, RawRecord, RecordType};
use crate::errors::FormatError;

pub const CAA_TAG_LEN_MIN: u8 = 1;
pub const CAA_TAG_LEN_MAX: u8 = 15;

const HEADER_LEN: usize = 2;

pub fn parse(rdata: &[u8]) -> Result<CaaRecord, FormatError> {
    let (flags, tag_length) = match rdata {
        [flags, tag_length, ..] => (*flags, *tag_length),
        _ => {
            return Err(FormatError::InsufficientData {
                record_type: RecordType::CAA,
                needed: HEADER_LEN,
                actual: rdata.len(),
            })
        }
    };

    if !(CAA_TAG_LEN_MIN..=CAA_TAG_LEN_MAX).contains(&tag_length) {
        return Err(FormatError::CaaTagLength {
            length: tag_length,
            min: CAA_TAG_LEN_MIN,
            max: CAA_TAG_LEN_MAX,
        });
    }

    let tag_end = HEADER_LEN + usize::from(tag_length);
    let tag_bytes = rdata
        .get(HEADER_LEN..tag_end)
        .ok_or(FormatError::InsufficientData {
            record_type: RecordType::CAA,
            needed: tag_end,
            actual: rdata.len(),
        })?;

    if let Some(pos) = tag_bytes.iter().position(|b| !b.is_ascii()) {
        return Err(FormatError::CaaTagNotAscii {
            byte: tag_bytes[pos],
            offset: HEADER_LEN + pos,
        });
    }
    let tag: String = tag_bytes.iter().map(|&b| char::from(b)).collect();

    Ok(CaaRecord {
        flags,
        tag,
        value: rdata[tag_end..].to_vec(),
    })
}

/// Parses a set of CAA RDATA buffers, one property per buffer.
///
/// Fails on the first malformed buffer; a policy record that cannot be read
/// must not silently disappear from the set.
pub fn as_caa_list<'a, I>(records: I) -> Result<Vec<CaaRecord>, FormatError>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    records.into_iter().map(|r| parse(r.as_bytes())).collect()
}
