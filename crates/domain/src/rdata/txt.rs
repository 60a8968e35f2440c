use crate::dns_record::RecordType;
use crate::errors::FormatError;

/// One or more `<character-string>`s, each a length byte followed by that
/// many bytes. Strings are kept as bytes; TXT content is not required to be
/// UTF-8.
pub fn parse(rdata: &[u8]) -> Result<Vec<Vec<u8>>, FormatError> {
    if rdata.is_empty() {
        return Err(FormatError::InsufficientData {
            record_type: RecordType::TXT,
            needed: 1,
            actual: 0,
        });
    }

    let mut strings = Vec::new();
    let mut pos = 0;
    while pos < rdata.len() {
        let declared = usize::from(rdata[pos]);
        let start = pos + 1;
        let chunk = rdata
            .get(start..start + declared)
            .ok_or(FormatError::CharacterStringOverrun {
                offset: pos,
                declared,
                available: rdata.len() - start,
            })?;
        strings.push(chunk.to_vec());
        pos = start + declared;
    }
    Ok(strings)
}
