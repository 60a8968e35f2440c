//! Uncompressed domain names inside RDATA (RFC 1035 §3.1).

use crate::dns_record::RecordType;
use crate::errors::FormatError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Reads a name starting at `offset`.
///
/// Returns the presentation form and the offset just past the terminating
/// root label. Compression pointers are rejected: RDATA arrives detached from
/// the message they would point into.
pub fn read_name(rdata: &[u8], offset: usize) -> Result<(String, usize), FormatError> {
    let mut pos = offset;
    let mut labels: Vec<&[u8]> = Vec::new();

    loop {
        let len_byte = *rdata.get(pos).ok_or(FormatError::MalformedName {
            offset: pos,
            reason: "missing root label",
        })?;

        match len_byte & 0xC0 {
            0x00 => {}
            0xC0 => {
                return Err(FormatError::MalformedName {
                    offset: pos,
                    reason: "compression pointer in RDATA",
                })
            }
            _ => {
                return Err(FormatError::MalformedName {
                    offset: pos,
                    reason: "reserved label type",
                })
            }
        }

        let len = usize::from(len_byte);
        if pos + 1 - offset + len > MAX_NAME_LEN {
            return Err(FormatError::MalformedName {
                offset: pos,
                reason: "name exceeds 255 bytes",
            });
        }
        if len == 0 {
            pos += 1;
            break;
        }
        if len > MAX_LABEL_LEN {
            return Err(FormatError::MalformedName {
                offset: pos,
                reason: "label exceeds 63 bytes",
            });
        }

        let label = rdata
            .get(pos + 1..pos + 1 + len)
            .ok_or(FormatError::MalformedName {
                offset: pos,
                reason: "label runs past end of RDATA",
            })?;
        labels.push(label);
        pos += 1 + len;
    }

    Ok((to_presentation(&labels), pos))
}

/// Decodes RDATA that is exactly one name (NS, CNAME, PTR).
pub fn parse_single(record_type: RecordType, rdata: &[u8]) -> Result<String, FormatError> {
    let (name, end) = read_name(rdata, 0)?;
    if end != rdata.len() {
        return Err(FormatError::TrailingData {
            record_type,
            count: rdata.len() - end,
        });
    }
    Ok(name)
}

fn to_presentation(labels: &[&[u8]]) -> String {
    if labels.is_empty() {
        return ".".to_string();
    }

    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        for &b in label.iter() {
            match b {
                b'.' | b'\\' => {
                    out.push('\\');
                    out.push(char::from(b));
                }
                0x21..=0x7e => out.push(char::from(b)),
                _ => out.push_str(&format!("\\{:03}", b)),
            }
        }
    }
    out
}
