#![allow(dead_code)]
use rrbridge_domain::RawRecord;

/// Builds CAA RDATA the way an authoritative server puts it on the wire.
pub struct CaaRdataBuilder {
    flags: u8,
    tag: Vec<u8>,
    tag_length: Option<u8>,
    value: Vec<u8>,
}

impl CaaRdataBuilder {
    pub fn new() -> Self {
        Self {
            flags: 0,
            tag: b"issue".to_vec(),
            tag_length: None,
            value: Vec::new(),
        }
    }

    pub fn flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn tag(mut self, tag: &[u8]) -> Self {
        self.tag = tag.to_vec();
        self
    }

    /// Overrides the length byte without touching the tag bytes.
    pub fn tag_length(mut self, length: u8) -> Self {
        self.tag_length = Some(length);
        self
    }

    pub fn value(mut self, value: &[u8]) -> Self {
        self.value = value.to_vec();
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut rdata = vec![
            self.flags,
            self.tag_length.unwrap_or(self.tag.len() as u8),
        ];
        rdata.extend_from_slice(&self.tag);
        rdata.extend_from_slice(&self.value);
        rdata
    }

    pub fn build_raw(self) -> RawRecord {
        RawRecord::new(self.build())
    }
}

pub fn caa_rdata(flags: u8, tag: &[u8], value: &[u8]) -> Vec<u8> {
    CaaRdataBuilder::new()
        .flags(flags)
        .tag(tag)
        .value(value)
        .build()
}

pub fn wire_name(name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf
}

pub fn mx_rdata(priority: u16, exchange: &str) -> Vec<u8> {
    let mut rdata = priority.to_be_bytes().to_vec();
    rdata.extend_from_slice(&wire_name(exchange));
    rdata
}
