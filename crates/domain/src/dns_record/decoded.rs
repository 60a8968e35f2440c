use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
}

/// RFC 6844 property. Flags and value are returned verbatim; only the framing
/// and the tag's character set are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaaRecord {
    pub flags: u8,
    pub tag: String,
    pub value: Vec<u8>,
}

impl CaaRecord {
    pub const CRITICAL_FLAG: u8 = 0b1000_0000;

    pub fn new(flags: u8, tag: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            flags,
            tag: tag.into(),
            value: value.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.flags & Self::CRITICAL_FLAG != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsaRecord {
    pub usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum DecodedRecord {
    /// A or AAAA, in standard textual form.
    Address(String),
    Mx(MxRecord),
    Caa(CaaRecord),
    /// NS, CNAME or PTR target.
    Name(String),
    Txt(Vec<Vec<u8>>),
    Tlsa(TlsaRecord),
}

impl DecodedRecord {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            DecodedRecord::Address(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn as_mx(&self) -> Option<&MxRecord> {
        match self {
            DecodedRecord::Mx(mx) => Some(mx),
            _ => None,
        }
    }

    pub fn as_caa(&self) -> Option<&CaaRecord> {
        match self {
            DecodedRecord::Caa(caa) => Some(caa),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedRecord::Address(addr) => write!(f, "{}", addr),
            DecodedRecord::Name(name) => write!(f, "{}", name),
            DecodedRecord::Mx(mx) => write!(f, "{} {}", mx.priority, mx.exchange),
            DecodedRecord::Caa(caa) => {
                write!(f, "{} {} ", caa.flags, caa.tag)?;
                write_quoted(f, &caa.value)
            }
            DecodedRecord::Txt(strings) => {
                for (i, s) in strings.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_quoted(f, s)?;
                }
                Ok(())
            }
            DecodedRecord::Tlsa(tlsa) => {
                write!(f, "{} {} {} ", tlsa.usage, tlsa.selector, tlsa.matching_type)?;
                for byte in &tlsa.data {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("\"")?;
    for &b in bytes {
        match b {
            b'"' | b'\\' => write!(f, "\\{}", b as char)?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03}", b)?,
        }
    }
    f.write_str("\"")
}
