//! The career analysis domain: wire contract, transport, resilience and the
//! service facade the UI consumes.

pub mod client;
pub mod resilient;
pub mod services;
pub mod types;
pub mod wire;
