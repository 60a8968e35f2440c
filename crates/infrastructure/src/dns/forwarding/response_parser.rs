//! Upstream response parsing.
//!
//! Every RDATA reaches the decoders exactly as the server sent it, except that
//! names inside MX, NS, CNAME and PTR RDATA are expanded: they may be
//! compressed against the rest of the message, and a pointer cannot be
//! followed once the RDATA is cut out of the message.

use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::{Header, MessageType, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{
    BinDecodable, BinDecoder, BinEncodable, BinEncoder, NameEncoding, Restrict,
};
use rrbridge_domain::{DomainError, RawRecord, RecordType};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub rr_type: HickoryRecordType,
    pub rdata: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub answers: Vec<AnswerRecord>,
}

impl DnsResponse {
    /// RDATA of every answer of `record_type`, in answer order.
    pub fn into_records(self, record_type: RecordType) -> Vec<RawRecord> {
        self.answers
            .into_iter()
            .filter(|answer| RecordTypeMapper::from_hickory(answer.rr_type) == Some(record_type))
            .map(|answer| RawRecord::new(answer.rdata))
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses the header and answer section.
    ///
    /// A truncated response is returned with its header only; the caller is
    /// expected to retry over TCP.
    pub fn parse(buf: &[u8]) -> Result<DnsResponse, DomainError> {
        let mut decoder = BinDecoder::new(buf);

        let header = Header::read(&mut decoder)
            .map_err(|e| invalid(format!("Failed to read DNS header: {}", e)))?;

        if header.message_type() != MessageType::Response {
            return Err(invalid("QR bit not set".to_string()));
        }

        let id = header.id();
        let rcode = header.response_code();
        let truncated = header.truncated();

        if truncated {
            debug!(id, rcode = %rcode, "Truncated response, skipping answer section");
            return Ok(DnsResponse {
                id,
                rcode,
                truncated,
                answers: Vec::new(),
            });
        }

        for _ in 0..header.query_count() {
            Query::read(&mut decoder)
                .map_err(|e| invalid(format!("Failed to read question: {}", e)))?;
        }

        let mut answers = Vec::with_capacity(usize::from(header.answer_count()));
        for _ in 0..header.answer_count() {
            answers.push(read_answer(&mut decoder)?);
        }

        debug!(
            id,
            rcode = %rcode,
            answers = answers.len(),
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id,
            rcode,
            truncated,
            answers,
        })
    }
}

fn invalid(message: String) -> DomainError {
    DomainError::InvalidDnsResponse(message)
}

fn read_u16(decoder: &mut BinDecoder<'_>, field: &str) -> Result<u16, DomainError> {
    decoder
        .read_u16()
        .map(Restrict::unverified)
        .map_err(|e| invalid(format!("Failed to read {}: {}", field, e)))
}

fn read_bytes(decoder: &mut BinDecoder<'_>, len: usize) -> Result<Vec<u8>, DomainError> {
    decoder
        .read_slice(len)
        .map(|slice| slice.unverified().to_vec())
        .map_err(|e| invalid(format!("RDATA runs past the end of the message: {}", e)))
}

fn read_answer(decoder: &mut BinDecoder<'_>) -> Result<AnswerRecord, DomainError> {
    Name::read(decoder).map_err(|e| invalid(format!("Failed to read owner name: {}", e)))?;
    let rr_type = HickoryRecordType::from(read_u16(decoder, "record type")?);
    read_u16(decoder, "record class")?;
    decoder
        .read_u32()
        .map_err(|e| invalid(format!("Failed to read TTL: {}", e)))?;
    let rdlength = usize::from(read_u16(decoder, "RDATA length")?);

    let name_offset = match rr_type {
        HickoryRecordType::MX => 2,
        HickoryRecordType::NS | HickoryRecordType::CNAME | HickoryRecordType::PTR => 0,
        _ => {
            return Ok(AnswerRecord {
                rr_type,
                rdata: read_bytes(decoder, rdlength)?,
            })
        }
    };

    // Too short to hold a name; left for the decoder to reject.
    if rdlength <= name_offset {
        return Ok(AnswerRecord {
            rr_type,
            rdata: read_bytes(decoder, rdlength)?,
        });
    }

    let start = decoder.index();
    let end = start + rdlength;
    let mut rdata = read_bytes(decoder, name_offset)?;

    let name = Name::read(decoder)
        .map_err(|e| invalid(format!("Failed to expand name in RDATA at offset {}: {}", start, e)))?;
    if decoder.index() > end {
        return Err(invalid(format!(
            "name in RDATA at offset {} runs past its RDATA",
            start
        )));
    }

    let mut expanded = Vec::new();
    let mut encoder = BinEncoder::new(&mut expanded);
    encoder.set_name_encoding(NameEncoding::Uncompressed);
    name.emit(&mut encoder)
        .map_err(|e| invalid(format!("Failed to re-encode name: {}", e)))?;
    rdata.extend(expanded);

    let rest = end - decoder.index();
    rdata.extend(read_bytes(decoder, rest)?);

    Ok(AnswerRecord { rr_type, rdata })
}
