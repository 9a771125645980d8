//! Customer lookups and per-customer actions keyed by business identifier.

use crate::domain::customer::{Customer, CustomerUpdate, RecurringUpdate};
use crate::domain::search::{PageRequest, ResultEnvelope, SearchCriteria, SearchOperator};
use crate::domain::transaction::{Transaction, TransactionSummary};
use crate::domain::types::{CustomerNumber, UserId};
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::search::search;
use crate::services::{ServiceError, ServiceResult};

/// Page size used when listing every enabled customer.
pub const ENABLED_CUSTOMERS_LIMIT: usize = 500;

/// Resolves a business identifier to the processor's customer number.
///
/// A missing match is [`ServiceError::NotFound`] naming the identifier, never
/// a remote failure.
pub fn resolve_customer_number<R>(repo: &R, user_id: &UserId) -> ServiceResult<CustomerNumber>
where
    R: CustomerReader + ?Sized,
{
    match repo.search_customer_id(user_id) {
        Ok(number) => {
            log::info!("{user_id} = {number}");
            Ok(number)
        }
        Err(RepositoryError::NotFound) => {
            Err(ServiceError::NotFound(format!("no customer for {user_id}")))
        }
        Err(e) => {
            log::error!("Failed to resolve {user_id}: {e}");
            Err(e.into())
        }
    }
}

pub fn get_customer<R>(repo: &R, user_id: &UserId) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let number = resolve_customer_number(repo, user_id)?;
    Ok(repo.get_customer(number)?)
}

/// One page of the customers stored for a business identifier.
pub fn search_customers_by_id<R>(
    repo: &R,
    user_id: &UserId,
    page: Option<PageRequest>,
) -> ServiceResult<ResultEnvelope<Customer>>
where
    R: CustomerReader + ?Sized,
{
    search(repo, SearchCriteria::for_user_id(user_id), page)
}

pub fn get_all_customers<R>(repo: &R, user_id: &UserId) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    Ok(search_customers_by_id(repo, user_id, None)?.into_items())
}

/// Enabled customers ordered by their next billing date.
pub fn list_enabled_customers<R>(repo: &R) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let criteria = SearchCriteria::default().param("Enabled", SearchOperator::Eq, "true");
    let page = PageRequest::new(0, ENABLED_CUSTOMERS_LIMIT, "next")?;

    Ok(search(repo, criteria, Some(page))?.into_items())
}

/// Whether any stored customer of the identifier is billed automatically.
pub fn auto_bill_enabled<R>(repo: &R, user_id: &UserId) -> ServiceResult<bool>
where
    R: CustomerReader + ?Sized,
{
    Ok(get_all_customers(repo, user_id)?
        .iter()
        .any(|customer| customer.enabled))
}

pub fn enable_customer<R>(repo: &R, user_id: &UserId) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let number = resolve_customer_number(repo, user_id)?;
    repo.enable_customer(number)?;
    Ok(())
}

pub fn disable_customer<R>(repo: &R, user_id: &UserId) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let number = resolve_customer_number(repo, user_id)?;
    disable_customer_number(repo, number)
}

/// Disables one customer by its processor number, skipping resolution.
pub fn disable_customer_number<R>(repo: &R, number: CustomerNumber) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    repo.disable_customer(number).map_err(|e| {
        log::error!("Failed to disable customer {number}: {e}");
        ServiceError::from(e)
    })
}

/// Passes the field map to the processor unchanged.
pub fn update_customer<R>(
    repo: &R,
    number: CustomerNumber,
    update: &CustomerUpdate,
) -> ServiceResult<bool>
where
    R: CustomerWriter + ?Sized,
{
    if update.is_empty() {
        return Err(ServiceError::TypeConstraint(
            "customer update has no fields".to_string(),
        ));
    }
    Ok(repo.update_customer(number, update)?)
}

pub fn update_recurring<R>(
    repo: &R,
    number: CustomerNumber,
    update: RecurringUpdate,
) -> ServiceResult<bool>
where
    R: CustomerWriter + ?Sized,
{
    update_customer(repo, number, &CustomerUpdate::from(update))
}

/// Transaction history of one customer, normalized, in remote order.
pub fn customer_history<R>(
    repo: &R,
    number: CustomerNumber,
) -> ServiceResult<Vec<TransactionSummary>>
where
    R: CustomerReader + ?Sized,
{
    let history = repo.get_customer_history(number)?;
    summarize_all(history.items())
}

/// Every customer of the identifier paired with its transaction history.
pub fn history_for<R>(
    repo: &R,
    user_id: &UserId,
) -> ServiceResult<Vec<(Customer, Vec<TransactionSummary>)>>
where
    R: CustomerReader + ?Sized,
{
    get_all_customers(repo, user_id)?
        .into_iter()
        .map(|customer| {
            let history = customer_history(repo, customer.customer_number)?;
            Ok((customer, history))
        })
        .collect()
}

pub(crate) fn summarize_all(transactions: &[Transaction]) -> ServiceResult<Vec<TransactionSummary>> {
    transactions
        .iter()
        .map(|transaction| {
            transaction
                .summarize()
                .map_err(|e| ServiceError::Remote(RepositoryError::Protocol(e.to_string())))
        })
        .collect()
}
