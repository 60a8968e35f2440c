use rrbridge_domain::{DnsQuery, DomainError, RawRecord};
use std::fmt;

/// Completion status meaning the lookup succeeded. Data may still be absent.
pub const STATUS_SUCCESS: i32 = 0;

/// Correlation id a caller attaches to one query. The context hands it back
/// unchanged as the first argument of the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallToken(u64);

impl CallToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle the context assigns to an outstanding query, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryId(u64);

impl QueryId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoked at most once per query with `(token, status, data)`. `Sync` so
/// contexts can park it in a shared pending table.
pub type CompletionCallback =
    Box<dyn FnOnce(CallToken, i32, Option<Vec<RawRecord>>) + Send + Sync>;

/// Asynchronous, callback-driven resolver.
///
/// Callbacks fire only from within `process_events` or, for contexts that
/// answer immediately, from within `query_async` itself. A context that drops
/// a callback without calling it must do so only for cancelled queries.
pub trait ResolverContext: Send + Sync {
    fn query_async(
        &self,
        query: &DnsQuery,
        token: CallToken,
        on_complete: CompletionCallback,
    ) -> Result<QueryId, DomainError>;

    /// Runs one event-processing step and returns how many callbacks fired.
    fn process_events(&self) -> Result<usize, DomainError>;

    /// After this returns the callback for `id` is never invoked.
    fn cancel(&self, id: QueryId);
}
