//! skillscope: the client core of a career-guidance app.
//!
//! The user holds a set of skill tokens; this crate matches them against a
//! job catalog and produces derived analyses through a service facade that
//! prefers a live backend but degrades gracefully: bounded retries with
//! linear backoff, then a local response cache, then deterministic stubs.

pub mod cache;
pub mod career;
pub mod config;
pub mod matching;
pub mod stubs;
