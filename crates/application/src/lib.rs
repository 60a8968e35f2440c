//! rrbridge application layer: the Resolver Context port and the blocking
//! resolution use case built on top of it.
pub mod ports;
pub mod use_cases;
