use crate::domain::date::DayDate;
use crate::domain::search::{PageRequest, ResourceKind};
use crate::domain::transaction::{Transaction, TransactionSummary};
use crate::domain::types::{RefNum, UserId};
use crate::repository::errors::RepositoryError;
use crate::repository::{TransactionReader, TransactionWriter};
use crate::services::customers::summarize_all;
use crate::services::search::search;
use crate::services::{ServiceError, ServiceResult};

/// Field holding the creation timestamp of a transaction.
const CREATED_FIELD: &str = "created";

/// Transactions created during one calendar day, first page, oldest first.
pub fn transactions_for_day<R>(
    repo: &R,
    day: &DayDate,
    page: Option<PageRequest>,
) -> ServiceResult<Vec<TransactionSummary>>
where
    R: TransactionReader + ?Sized,
{
    let criteria = day.range().to_criteria(CREATED_FIELD);
    let page = page.unwrap_or_else(|| PageRequest::first(ResourceKind::Transaction));

    let envelope = search::<Transaction, R>(repo, criteria, Some(page))?;
    summarize_all(envelope.items())
}

pub fn get_transaction<R>(repo: &R, ref_num: RefNum) -> ServiceResult<TransactionSummary>
where
    R: TransactionReader + ?Sized,
{
    let transaction = repo.get_transaction(ref_num)?;
    transaction
        .summarize()
        .map_err(|e| ServiceError::Remote(RepositoryError::Protocol(e.to_string())))
}

/// Voids a transaction only when it belongs to `user_id` and is still
/// authorized. Returns `false` without calling the void operation otherwise.
pub fn void_transaction<R>(repo: &R, user_id: &UserId, ref_num: RefNum) -> ServiceResult<bool>
where
    R: TransactionReader + TransactionWriter + ?Sized,
{
    let summary = get_transaction(repo, ref_num)?;

    if summary.customer_id.as_deref() != Some(user_id.as_str()) {
        log::warn!("Refusing to void {ref_num}: not a transaction of {user_id}");
        return Ok(false);
    }
    if !summary.is_authorized() {
        log::warn!(
            "Refusing to void {ref_num}: status is {}",
            summary.status.as_deref().unwrap_or("unknown")
        );
        return Ok(false);
    }

    let voided = repo.void_transaction(ref_num)?;
    log::info!("Void of {ref_num} for {user_id}: {voided}");
    Ok(voided)
}
