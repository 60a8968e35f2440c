use std::fmt;

/// Lifecycle of one blocking resolve call.
///
/// `Idle -> Querying -> {Completed, Cancelled, Failed}`. A call that fails to
/// issue its query goes straight from `Idle` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Querying,
    Completed,
    Cancelled,
    Failed,
}

impl CallState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CallState::Completed | CallState::Cancelled | CallState::Failed
        )
    }

    pub fn can_transition_to(self, next: CallState) -> bool {
        match (self, next) {
            (CallState::Idle, CallState::Querying) | (CallState::Idle, CallState::Failed) => true,
            (CallState::Querying, next) => next.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallState::Idle => "idle",
            CallState::Querying => "querying",
            CallState::Completed => "completed",
            CallState::Cancelled => "cancelled",
            CallState::Failed => "failed",
        }
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
