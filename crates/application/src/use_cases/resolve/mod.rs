mod call_state;
mod resolve_records;

pub use call_state::CallState;
pub use resolve_records::ResolveRecordsUseCase;
