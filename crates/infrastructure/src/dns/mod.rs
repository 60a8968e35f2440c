pub mod context;
pub mod forwarding;
pub mod status;
pub mod transport;
pub mod upstream;

pub use context::HickoryResolverContext;
pub use status::ResolverStatus;
