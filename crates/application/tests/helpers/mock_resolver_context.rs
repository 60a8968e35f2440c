#![allow(dead_code)]

use rrbridge_application::ports::{
    CallToken, CompletionCallback, QueryId, ResolverContext, STATUS_SUCCESS,
};
use rrbridge_domain::{DnsQuery, DomainError, RawRecord, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock does with a query once its delivery step comes around.
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond {
        status: i32,
        data: Option<Vec<RawRecord>>,
    },
    /// Stays pending until cancelled.
    Hang,
    /// Drops the callback without invoking it.
    Abandon,
}

impl Scripted {
    pub fn records(records: Vec<RawRecord>) -> Self {
        Scripted::Respond {
            status: STATUS_SUCCESS,
            data: Some(records),
        }
    }

    pub fn no_data() -> Self {
        Scripted::Respond {
            status: STATUS_SUCCESS,
            data: None,
        }
    }

    pub fn status(status: i32) -> Self {
        Scripted::Respond { status, data: None }
    }
}

struct Pending {
    id: QueryId,
    token: CallToken,
    callback: CompletionCallback,
    action: Scripted,
    remaining_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQuery {
    pub domain: String,
    pub record_type: RecordType,
    pub token: CallToken,
    pub id: QueryId,
}

/// Scripted `ResolverContext` that records every interaction.
pub struct MockResolverContext {
    script: Mutex<HashMap<(String, RecordType), Scripted>>,
    pending: Mutex<Vec<Pending>>,
    issued: Mutex<Vec<IssuedQuery>>,
    cancelled: Mutex<Vec<QueryId>>,
    next_id: AtomicU64,
    event_steps: AtomicUsize,
    delivery_delay: AtomicUsize,
    deliver_inline: AtomicBool,
    reject_queries: AtomicBool,
    fail_events: AtomicBool,
    token_override: Mutex<Option<CallToken>>,
}

impl MockResolverContext {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            pending: Mutex::new(Vec::new()),
            issued: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(100),
            event_steps: AtomicUsize::new(0),
            delivery_delay: AtomicUsize::new(0),
            deliver_inline: AtomicBool::new(false),
            reject_queries: AtomicBool::new(false),
            fail_events: AtomicBool::new(false),
            token_override: Mutex::new(None),
        }
    }

    pub fn script(&self, domain: &str, record_type: RecordType, action: Scripted) {
        self.script
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), action);
    }

    /// Number of `process_events` steps a query waits before delivery.
    pub fn set_delivery_delay(&self, steps: usize) {
        self.delivery_delay.store(steps, Ordering::SeqCst);
    }

    /// Fire callbacks from inside `query_async`.
    pub fn set_deliver_inline(&self, inline: bool) {
        self.deliver_inline.store(inline, Ordering::SeqCst);
    }

    pub fn set_reject_queries(&self, reject: bool) {
        self.reject_queries.store(reject, Ordering::SeqCst);
    }

    pub fn set_fail_events(&self, fail: bool) {
        self.fail_events.store(fail, Ordering::SeqCst);
    }

    pub fn set_token_override(&self, token: CallToken) {
        *self.token_override.lock().unwrap() = Some(token);
    }

    pub fn issued(&self) -> Vec<IssuedQuery> {
        self.issued.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<QueryId> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn event_steps(&self) -> usize {
        self.event_steps.load(Ordering::SeqCst)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    fn deliver(&self, pending: Pending) -> usize {
        let token = self.token_override.lock().unwrap().unwrap_or(pending.token);
        match pending.action {
            Scripted::Respond { status, data } => {
                (pending.callback)(token, status, data);
                1
            }
            Scripted::Abandon => {
                drop(pending.callback);
                0
            }
            Scripted::Hang => unreachable!("hanging queries are never delivered"),
        }
    }
}

impl Default for MockResolverContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverContext for MockResolverContext {
    fn query_async(
        &self,
        query: &DnsQuery,
        token: CallToken,
        on_complete: CompletionCallback,
    ) -> Result<QueryId, DomainError> {
        if self.reject_queries.load(Ordering::SeqCst) {
            return Err(DomainError::Context("query rejected".to_string()));
        }

        let id = QueryId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.issued.lock().unwrap().push(IssuedQuery {
            domain: query.domain.to_string(),
            record_type: query.record_type,
            token,
            id,
        });

        let action = self
            .script
            .lock()
            .unwrap()
            .get(&(query.domain.to_string(), query.record_type))
            .cloned()
            .unwrap_or_else(Scripted::no_data);

        let pending = Pending {
            id,
            token,
            callback: on_complete,
            action,
            remaining_steps: self.delivery_delay.load(Ordering::SeqCst),
        };

        if self.deliver_inline.load(Ordering::SeqCst) && !matches!(pending.action, Scripted::Hang)
        {
            self.deliver(pending);
        } else {
            self.pending.lock().unwrap().push(pending);
        }
        Ok(id)
    }

    fn process_events(&self) -> Result<usize, DomainError> {
        self.event_steps.fetch_add(1, Ordering::SeqCst);
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(DomainError::Context("event loop failure".to_string()));
        }

        let ready: Vec<Pending> = {
            let mut pending = self.pending.lock().unwrap();
            let mut ready = Vec::new();
            let mut waiting = Vec::new();
            for mut entry in pending.drain(..) {
                if matches!(entry.action, Scripted::Hang) {
                    waiting.push(entry);
                } else if entry.remaining_steps == 0 {
                    ready.push(entry);
                } else {
                    entry.remaining_steps -= 1;
                    waiting.push(entry);
                }
            }
            *pending = waiting;
            ready
        };

        Ok(ready.into_iter().map(|entry| self.deliver(entry)).sum())
    }

    fn cancel(&self, id: QueryId) {
        self.cancelled.lock().unwrap().push(id);
        self.pending.lock().unwrap().retain(|entry| entry.id != id);
    }
}
