use crate::dns::forwarding::{DnsResponse, ResponseParser};
use crate::dns::status::ResolverStatus;
use crate::dns::transport;
use rrbridge_domain::{DnsProtocol, DomainError, RawRecord, RecordType};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of a single-server query attempt
pub struct QueryAttemptResult {
    pub response: DnsResponse,
    pub server: DnsProtocol,
    pub latency_ms: u64,
}

/// Sends a prepared query to one upstream and parses the answer.
///
/// A truncated UDP answer is retried over TCP against the same server with
/// whatever remains of the timeout.
pub async fn query_server(
    protocol: &DnsProtocol,
    query_id: u16,
    query_bytes: &[u8],
    timeout: Duration,
) -> Result<QueryAttemptResult, DomainError> {
    let start = Instant::now();

    let response = exchange(protocol, query_id, query_bytes, timeout).await?;

    if response.truncated && matches!(protocol, DnsProtocol::Udp { .. }) {
        let tcp = protocol.as_tcp();
        debug!(server = %protocol, "Response truncated (TC bit), retrying via TCP");

        let remaining = timeout
            .checked_sub(start.elapsed())
            .unwrap_or(Duration::from_millis(500));
        let response = exchange(&tcp, query_id, query_bytes, remaining).await?;

        return Ok(QueryAttemptResult {
            response,
            server: tcp,
            latency_ms: start.elapsed().as_millis() as u64,
        });
    }

    Ok(QueryAttemptResult {
        response,
        server: *protocol,
        latency_ms: start.elapsed().as_millis() as u64,
    })
}

async fn exchange(
    protocol: &DnsProtocol,
    query_id: u16,
    query_bytes: &[u8],
    timeout: Duration,
) -> Result<DnsResponse, DomainError> {
    let dns_transport = transport::create_transport(protocol);
    debug!(server = %protocol, transport = dns_transport.protocol_name(), "Sending query");
    let transport_response = dns_transport.send(query_bytes, timeout).await?;
    debug!(
        server = %protocol,
        transport = transport_response.protocol_used,
        bytes = transport_response.bytes.len(),
        "Upstream answered"
    );
    let response = ResponseParser::parse(&transport_response.bytes)?;

    if response.id != query_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response ID {} does not match query ID {} from {}",
            response.id, query_id, protocol
        )));
    }
    Ok(response)
}

/// Tries each upstream in order until one answers.
pub async fn query_failover(
    servers: &[DnsProtocol],
    query_id: u16,
    query_bytes: &[u8],
    timeout: Duration,
) -> Result<QueryAttemptResult, DomainError> {
    let mut last_error = DomainError::TransportAllServersUnreachable;

    for (index, protocol) in servers.iter().enumerate() {
        match query_server(protocol, query_id, query_bytes, timeout).await {
            Ok(result) => {
                debug!(server = %result.server, latency_ms = result.latency_ms, position = index, "Server responded");
                return Ok(result);
            }
            Err(e) => {
                warn!(protocol = %protocol, error = %e, position = index, "Failing over");
                last_error = e;
            }
        }
    }

    if last_error.is_transport_error() {
        return Err(DomainError::TransportAllServersUnreachable);
    }
    Err(last_error)
}

/// Runs a lookup and folds its result into a completion `(status, data)`.
pub async fn lookup(
    servers: &[DnsProtocol],
    query_id: u16,
    query_bytes: &[u8],
    record_type: RecordType,
    timeout: Duration,
) -> (i32, Option<Vec<RawRecord>>) {
    match query_failover(servers, query_id, query_bytes, timeout).await {
        Ok(result) => {
            let status = ResolverStatus::from_rcode(result.response.rcode);
            if status != ResolverStatus::SUCCESS {
                return (status, None);
            }
            let records = result.response.into_records(record_type);
            if records.is_empty() {
                (status, None)
            } else {
                (status, Some(records))
            }
        }
        Err(e) if e.is_transport_error() => (ResolverStatus::TRANSPORT_FAILURE, None),
        Err(_) => (ResolverStatus::BAD_RESPONSE, None),
    }
}
