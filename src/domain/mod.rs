//! Domain values exposed by the query and orchestration layer.

pub mod batch;
pub mod customer;
pub mod date;
pub mod report;
pub mod search;
pub mod session;
pub mod transaction;
pub mod types;
