pub mod batches;
pub mod bulk;
pub mod customers;
pub mod errors;
pub mod reports;
pub mod search;
pub mod transactions;

pub use errors::{ServiceError, ServiceResult};
