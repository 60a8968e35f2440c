use super::CallState;
use crate::ports::{CallToken, CompletionCallback, QueryId, ResolverContext, STATUS_SUCCESS};
use rrbridge_domain::{rdata, DecodedRecord, DnsQuery, DomainError, RawRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

struct Completion {
    token: CallToken,
    status: i32,
    data: Option<Vec<RawRecord>>,
}

/// Turns the callback-driven `ResolverContext` into a blocking call.
///
/// The calling thread pumps `process_events` itself until the completion
/// for its query arrives. Every call owns its own single-message channel and
/// token; concurrent calls share nothing but the context.
pub struct ResolveRecordsUseCase {
    context: Arc<dyn ResolverContext>,
    next_token: AtomicU64,
}

impl ResolveRecordsUseCase {
    pub fn new(context: Arc<dyn ResolverContext>) -> Self {
        Self {
            context,
            next_token: AtomicU64::new(1),
        }
    }

    pub fn execute(&self, query: &DnsQuery) -> Result<Vec<DecodedRecord>, DomainError> {
        self.resolve(query, None)
    }

    /// Like `execute`, but gives up with `DomainError::Cancelled` once `cancel`
    /// fires. The token is checked between event-processing steps.
    pub fn execute_cancellable(
        &self,
        query: &DnsQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<DecodedRecord>, DomainError> {
        self.resolve(query, Some(cancel))
    }

    fn resolve(
        &self,
        query: &DnsQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<DecodedRecord>, DomainError> {
        let mut call = Call::new(query, self.issue_token());

        if query.domain.is_empty() {
            call.transition(CallState::Failed);
            return Err(DomainError::InvalidDomainName(
                "empty domain name".to_string(),
            ));
        }

        let (sender, receiver) = mpsc::sync_channel::<Completion>(1);
        let on_complete: CompletionCallback = Box::new(move |token, status, data| {
            if sender.send(Completion { token, status, data }).is_err() {
                debug!(token = %token, "Completion arrived after the call gave up");
            }
        });

        let query_id = match self.context.query_async(query, call.token, on_complete) {
            Ok(id) => id,
            Err(e) => {
                call.transition(CallState::Failed);
                warn!(error = %e, query = %query, "Resolver context rejected query");
                return Err(e);
            }
        };
        call.query_id = Some(query_id);
        call.transition(CallState::Querying);

        let completion = self.wait_for_completion(&mut call, &receiver, cancel)?;
        self.finish(&mut call, completion)
    }

    fn issue_token(&self) -> CallToken {
        CallToken::new(self.next_token.fetch_add(1, Ordering::Relaxed))
    }

    fn wait_for_completion(
        &self,
        call: &mut Call<'_>,
        receiver: &Receiver<Completion>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Completion, DomainError> {
        let mut steps: u64 = 0;
        loop {
            // Contexts may answer from inside query_async, so look before pumping.
            match receiver.try_recv() {
                Ok(completion) => {
                    debug!(query = %call.query, steps, "Completion received");
                    return Ok(completion);
                }
                Err(TryRecvError::Disconnected) => {
                    call.transition(CallState::Failed);
                    warn!(query = %call.query, token = %call.token, "Callback dropped without firing");
                    return Err(DomainError::QueryAbandoned {
                        name: call.query.domain.to_string(),
                    });
                }
                Err(TryRecvError::Empty) => {}
            }

            if cancel.is_some_and(CancellationToken::is_cancelled) {
                self.cancel_outstanding(call);
                call.transition(CallState::Cancelled);
                return Err(DomainError::Cancelled {
                    name: call.query.domain.to_string(),
                    record_type: call.query.record_type,
                });
            }

            if let Err(e) = self.context.process_events() {
                self.cancel_outstanding(call);
                call.transition(CallState::Failed);
                warn!(error = %e, query = %call.query, "Event processing failed");
                return Err(e);
            }
            steps += 1;
        }
    }

    fn cancel_outstanding(&self, call: &Call<'_>) {
        if let Some(id) = call.query_id {
            debug!(query = %call.query, query_id = %id, "Cancelling outstanding query");
            self.context.cancel(id);
        }
    }

    fn finish(
        &self,
        call: &mut Call<'_>,
        completion: Completion,
    ) -> Result<Vec<DecodedRecord>, DomainError> {
        let name = call.query.domain.to_string();
        let record_type = call.query.record_type;

        if completion.token != call.token {
            call.transition(CallState::Failed);
            return Err(DomainError::TokenMismatch {
                expected: call.token.get(),
                received: completion.token.get(),
            });
        }

        if completion.status != STATUS_SUCCESS {
            call.transition(CallState::Failed);
            debug!(query = %call.query, status = completion.status, "Resolution failed");
            return Err(DomainError::ResolutionFailed {
                name,
                record_type,
                status: completion.status,
            });
        }

        let Some(records) = completion.data else {
            call.transition(CallState::Completed);
            return Ok(Vec::new());
        };

        match rdata::decode_all(record_type, records) {
            Ok(decoded) => {
                call.transition(CallState::Completed);
                debug!(query = %call.query, count = decoded.len(), "Records decoded");
                Ok(decoded)
            }
            Err(source) => {
                call.transition(CallState::Failed);
                warn!(query = %call.query, error = %source, "Malformed record in answer");
                Err(DomainError::MalformedRecord {
                    name,
                    record_type,
                    source,
                })
            }
        }
    }
}

struct Call<'q> {
    query: &'q DnsQuery,
    token: CallToken,
    query_id: Option<QueryId>,
    state: CallState,
}

impl<'q> Call<'q> {
    fn new(query: &'q DnsQuery, token: CallToken) -> Self {
        Self {
            query,
            token,
            query_id: None,
            state: CallState::Idle,
        }
    }

    fn transition(&mut self, next: CallState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid call transition {} -> {}",
            self.state,
            next
        );
        debug!(query = %self.query, token = %self.token, from = %self.state, to = %next, "Call state");
        self.state = next;
    }
}
