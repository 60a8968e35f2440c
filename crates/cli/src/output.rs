use rrbridge_domain::{DecodedRecord, DnsQuery};
use std::io::Write;

pub fn print_records(
    out: &mut impl Write,
    query: &DnsQuery,
    records: &[DecodedRecord],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, ";; no {} records for {}", query.record_type, query.domain)?;
        return Ok(());
    }

    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}
