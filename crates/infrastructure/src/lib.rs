//! rrbridge infrastructure: a `ResolverContext` that forwards queries to
//! upstream DNS servers over UDP and TCP.
pub mod dns;
