//! Payloads exchanged with relay callers.

pub mod gateway;
