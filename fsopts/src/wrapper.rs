//! Wrappers around config builders.

#[cfg(feature = "tracing")]
pub mod trace;
