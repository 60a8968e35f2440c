use crate::dns_record::RecordType;
use crate::errors::FormatError;
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn parse_ipv4(rdata: &[u8]) -> Result<String, FormatError> {
    let octets: [u8; 4] = rdata.try_into().map_err(|_| FormatError::InvalidLength {
        record_type: RecordType::A,
        expected: 4,
        actual: rdata.len(),
    })?;
    Ok(Ipv4Addr::from(octets).to_string())
}

pub fn parse_ipv6(rdata: &[u8]) -> Result<String, FormatError> {
    let octets: [u8; 16] = rdata.try_into().map_err(|_| FormatError::InvalidLength {
        record_type: RecordType::AAAA,
        expected: 16,
        actual: rdata.len(),
    })?;
    Ok(Ipv6Addr::from(octets).to_string())
}
