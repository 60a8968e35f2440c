mod mock_resolver_context;
mod rdata;

pub use mock_resolver_context::*;
pub use rdata::*;
