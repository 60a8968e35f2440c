use crate::dns::forwarding::MessageBuilder;
use crate::dns::upstream;
use dashmap::DashMap;
use rrbridge_application::ports::{CallToken, CompletionCallback, QueryId, ResolverContext};
use rrbridge_domain::{DnsProtocol, DnsQuery, DomainError, RawRecord, ResolverConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;
use tracing::{debug, info};

struct PendingQuery {
    token: CallToken,
    callback: CompletionCallback,
    abort: Option<AbortHandle>,
}

struct FinishedQuery {
    id: QueryId,
    status: i32,
    data: Option<Vec<RawRecord>>,
}

/// `ResolverContext` that forwards queries to upstream servers.
///
/// Lookups run on a private tokio runtime. Their results wait in a
/// completion queue until a caller drives `process_events`, which is the only
/// place callbacks are invoked.
pub struct HickoryResolverContext {
    runtime: Runtime,
    servers: Arc<[DnsProtocol]>,
    query_timeout: Duration,
    poll_interval: Duration,
    pending: DashMap<QueryId, PendingQuery>,
    completions_tx: Sender<FinishedQuery>,
    completions_rx: Mutex<Receiver<FinishedQuery>>,
    next_id: AtomicU64,
}

impl HickoryResolverContext {
    pub fn new(config: &ResolverConfig) -> Result<Self, DomainError> {
        let servers = config
            .endpoints()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;
        if servers.is_empty() {
            return Err(DomainError::ConfigError(
                "No upstream servers configured".to_string(),
            ));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("rrbridge-resolver")
            .enable_all()
            .build()
            .map_err(|e| DomainError::Context(format!("Failed to start resolver runtime: {}", e)))?;

        let (completions_tx, completions_rx) = mpsc::channel();

        info!(
            servers = servers.len(),
            timeout_ms = config.query_timeout_ms,
            workers = config.worker_threads,
            "Resolver context started"
        );

        Ok(Self {
            runtime,
            servers: servers.into(),
            query_timeout: config.query_timeout(),
            poll_interval: config.poll_interval(),
            pending: DashMap::new(),
            completions_tx,
            completions_rx: Mutex::new(completions_rx),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn servers(&self) -> &[DnsProtocol] {
        &self.servers
    }

    /// Queries issued but neither delivered nor cancelled yet.
    pub fn pending_queries(&self) -> usize {
        self.pending.len()
    }

    fn drain_completions(&self) -> Result<Vec<FinishedQuery>, DomainError> {
        let receiver = self
            .completions_rx
            .lock()
            .map_err(|_| DomainError::Context("completion queue lock poisoned".to_string()))?;

        let first = match receiver.recv_timeout(self.poll_interval) {
            Ok(finished) => finished,
            Err(RecvTimeoutError::Timeout) => return Ok(Vec::new()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(DomainError::Context(
                    "completion queue closed".to_string(),
                ))
            }
        };

        let mut finished = vec![first];
        finished.extend(receiver.try_iter());
        Ok(finished)
    }
}

impl ResolverContext for HickoryResolverContext {
    fn query_async(
        &self,
        query: &DnsQuery,
        token: CallToken,
        on_complete: CompletionCallback,
    ) -> Result<QueryId, DomainError> {
        let (wire_id, query_bytes) =
            MessageBuilder::build_query_with_id(&query.domain, query.record_type)?;

        let id = QueryId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.pending.insert(
            id,
            PendingQuery {
                token,
                callback: on_complete,
                abort: None,
            },
        );

        let servers = Arc::clone(&self.servers);
        let completions = self.completions_tx.clone();
        let record_type = query.record_type;
        let timeout = self.query_timeout;

        let handle = self.runtime.spawn(async move {
            let (status, data) =
                upstream::lookup(&servers, wire_id, &query_bytes, record_type, timeout).await;
            if completions.send(FinishedQuery { id, status, data }).is_err() {
                debug!(query_id = %id, "Context dropped before lookup finished");
            }
        });

        // The lookup may already have finished and been delivered
        if let Some(mut entry) = self.pending.get_mut(&id) {
            entry.abort = Some(handle.abort_handle());
        }

        debug!(query = %query, query_id = %id, token = %token, "Query issued");
        Ok(id)
    }

    fn process_events(&self) -> Result<usize, DomainError> {
        let finished = self.drain_completions()?;

        let mut delivered = 0;
        for done in finished {
            match self.pending.remove(&done.id) {
                Some((_, pending)) => {
                    debug!(query_id = %done.id, status = done.status, "Delivering completion");
                    (pending.callback)(pending.token, done.status, done.data);
                    delivered += 1;
                }
                None => debug!(query_id = %done.id, "Discarding completion of cancelled query"),
            }
        }
        Ok(delivered)
    }

    fn cancel(&self, id: QueryId) {
        match self.pending.remove(&id) {
            Some((_, pending)) => {
                if let Some(abort) = pending.abort {
                    abort.abort();
                }
                debug!(query_id = %id, "Query cancelled");
            }
            None => debug!(query_id = %id, "Cancel for query that already completed"),
        }
    }
}
