mod resolver_context;

pub use resolver_context::{
    CallToken, CompletionCallback, QueryId, ResolverContext, STATUS_SUCCESS,
};

// Re-export for convenience
pub use rrbridge_domain::{DnsQuery, RawRecord};
