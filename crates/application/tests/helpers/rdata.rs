#![allow(dead_code)]

use rrbridge_domain::RawRecord;
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn a_record(addr: &str) -> RawRecord {
    let addr: Ipv4Addr = addr.parse().unwrap();
    RawRecord::new(addr.octets().to_vec())
}

pub fn aaaa_record(addr: &str) -> RawRecord {
    let addr: Ipv6Addr = addr.parse().unwrap();
    RawRecord::new(addr.octets().to_vec())
}

pub fn mx_record(priority: u16, exchange: &str) -> RawRecord {
    let mut bytes = priority.to_be_bytes().to_vec();
    for label in exchange.split('.').filter(|l| !l.is_empty()) {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    RawRecord::new(bytes)
}

pub fn caa_record(flags: u8, tag: &str, value: &[u8]) -> RawRecord {
    let mut bytes = vec![flags, tag.len() as u8];
    bytes.extend_from_slice(tag.as_bytes());
    bytes.extend_from_slice(value);
    RawRecord::new(bytes)
}

/// The CAA set from RFC 6844 used throughout the bridge tests.
pub fn rfc6844_caa_set() -> Vec<RawRecord> {
    vec![
        caa_record(0, "issue", b"ca.example.net; account=230123 policy=ev"),
        caa_record(0, "iodef", b"mailto:security@example.com"),
        caa_record(0, "iodef", b"http://iodef.example.com/"),
        caa_record(128, "tbs", b"Unknown"),
    ]
}
