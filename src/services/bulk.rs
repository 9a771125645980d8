//! Search-then-act workflows over one page of remote results.
//!
//! Items are acted on strictly in the order the remote search returned them.
//! The first failing action aborts the run: earlier items stay processed and
//! later items are never attempted. Only the requested page is processed;
//! callers wanting more pages ask for them explicitly with [`PageRequest::next`].

use crate::domain::customer::Customer;
use crate::domain::search::{PageRequest, SearchCriteria, Searchable};
use crate::domain::types::UserId;
use crate::repository::{CustomerReader, CustomerWriter, Searcher};
use crate::services::customers::disable_customer_number;
use crate::services::search::search;
use crate::services::{ServiceError, ServiceResult};

/// Runs `action` on every item of one search page and returns how many succeeded.
///
/// On failure returns [`ServiceError::PartialBulk`] carrying the number of
/// items already processed and the zero-based position of the failing item.
pub fn bulk_apply<T, R, F>(
    repo: &R,
    criteria: SearchCriteria,
    page: Option<PageRequest>,
    mut action: F,
) -> ServiceResult<usize>
where
    T: Searchable,
    R: Searcher<T> + ?Sized,
    F: FnMut(&R, &T) -> ServiceResult<()>,
{
    let items = search::<T, R>(repo, criteria, page)?.into_items();
    let total = items.len();

    let processed = items
        .iter()
        .enumerate()
        .try_fold(0usize, |processed, (position, item)| {
            action(repo, item).map_err(|source| {
                log::error!(
                    "{} bulk operation aborted at item {position} of {total}: {source}",
                    T::KIND
                );
                ServiceError::PartialBulk {
                    processed,
                    failed_at: position,
                    source: Box::new(source),
                }
            })?;
            Ok::<_, ServiceError>(processed + 1)
        })?;

    log::info!("{} bulk operation processed {processed} item(s)", T::KIND);
    Ok(processed)
}

/// Disables every customer on the first page of matches for `user_id`.
pub fn disable_all<R>(repo: &R, user_id: &UserId) -> ServiceResult<usize>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    disable_all_on_page(repo, user_id, None)
}

/// [`disable_all`] over an explicitly chosen page of matches.
pub fn disable_all_on_page<R>(
    repo: &R,
    user_id: &UserId,
    page: Option<PageRequest>,
) -> ServiceResult<usize>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    bulk_apply::<Customer, R, _>(
        repo,
        SearchCriteria::for_user_id(user_id),
        page,
        |repo, customer| {
            log::info!("Disabling customer {}", customer.customer_number);
            disable_customer_number(repo, customer.customer_number)
        },
    )
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::domain::customer::{BillingAddress, CustomerUpdate};
    use crate::domain::search::{ResourceKind, ResultEnvelope, SearchQuery};
    use crate::domain::transaction::Transaction;
    use crate::domain::types::CustomerNumber;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRepository;

    fn customer(number: u64) -> Customer {
        Customer {
            customer_number: CustomerNumber::new(number).unwrap(),
            customer_id: "acme".to_string(),
            enabled: true,
            schedule: None,
            next: None,
            amount: None,
            description: None,
            billing: BillingAddress::default(),
        }
    }

    /// Serves a fixed page of customers and fails the disable of one number.
    struct FailingDisable {
        customers: Vec<Customer>,
        fail_on: Option<u64>,
        disable_calls: Cell<usize>,
        disabled: RefCell<Vec<u64>>,
        queries: RefCell<Vec<SearchQuery>>,
    }

    impl FailingDisable {
        fn new(numbers: &[u64], fail_on: Option<u64>) -> Self {
            Self {
                customers: numbers.iter().copied().map(customer).collect(),
                fail_on,
                disable_calls: Cell::new(0),
                disabled: RefCell::new(Vec::new()),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl CustomerReader for FailingDisable {
        fn search_customer_id(&self, _user_id: &UserId) -> RepositoryResult<CustomerNumber> {
            Err(RepositoryError::NotFound)
        }

        fn get_customer(&self, _number: CustomerNumber) -> RepositoryResult<Customer> {
            Err(RepositoryError::NotFound)
        }

        fn search_customers(
            &self,
            query: &SearchQuery,
        ) -> RepositoryResult<ResultEnvelope<Customer>> {
            self.queries.borrow_mut().push(query.clone());
            Ok(ResultEnvelope::new(self.customers.len(), self.customers.clone())?)
        }

        fn get_customer_history(
            &self,
            _number: CustomerNumber,
        ) -> RepositoryResult<ResultEnvelope<Transaction>> {
            Ok(ResultEnvelope::empty())
        }
    }

    impl CustomerWriter for FailingDisable {
        fn enable_customer(&self, _number: CustomerNumber) -> RepositoryResult<()> {
            Ok(())
        }

        fn disable_customer(&self, number: CustomerNumber) -> RepositoryResult<()> {
            self.disable_calls.set(self.disable_calls.get() + 1);
            if self.fail_on == Some(number.get()) {
                return Err(RepositoryError::Fault {
                    code: "40001".to_string(),
                    message: "Customer locked".to_string(),
                });
            }
            self.disabled.borrow_mut().push(number.get());
            Ok(())
        }

        fn update_customer(
            &self,
            _number: CustomerNumber,
            _update: &CustomerUpdate,
        ) -> RepositoryResult<bool> {
            Ok(true)
        }
    }

    fn acme() -> UserId {
        UserId::new("acme").unwrap()
    }

    #[test]
    fn second_failure_stops_before_third_item() {
        let repo = FailingDisable::new(&[1, 2, 3], Some(2));

        let result = disable_all(&repo, &acme());

        match result {
            Err(ServiceError::PartialBulk {
                processed,
                failed_at,
                source,
            }) => {
                assert_eq!(processed, 1);
                assert_eq!(failed_at, 1);
                assert!(matches!(
                    *source,
                    ServiceError::Remote(RepositoryError::Fault { .. })
                ));
            }
            other => panic!("expected PartialBulk, got {other:?}"),
        }
        assert_eq!(repo.disable_calls.get(), 2);
        assert_eq!(*repo.disabled.borrow(), vec![1]);
    }

    #[test]
    fn disables_every_match_in_remote_order() {
        let repo = FailingDisable::new(&[9, 4, 6], None);

        assert_eq!(disable_all(&repo, &acme()).unwrap(), 3);
        assert_eq!(*repo.disabled.borrow(), vec![9, 4, 6]);
    }

    #[test]
    fn searches_only_the_default_first_page() {
        let repo = FailingDisable::new(&[1], None);

        disable_all(&repo, &acme()).unwrap();

        let queries = repo.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].page, PageRequest::first(ResourceKind::Customer));
        assert_eq!(queries[0].criteria, SearchCriteria::for_user_id(&acme()));
    }

    #[test]
    fn explicit_page_is_forwarded() {
        let repo = FailingDisable::new(&[1], None);
        let second = PageRequest::first(ResourceKind::Customer).next();

        disable_all_on_page(&repo, &acme(), Some(second.clone())).unwrap();

        assert_eq!(repo.queries.borrow()[0].page, second);
    }

    #[test]
    fn empty_match_processes_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_search_customers()
            .times(1)
            .returning(|_| Ok(ResultEnvelope::new(0, Vec::new()).unwrap()));
        repo.expect_disable_customer().never();

        assert_eq!(disable_all(&repo, &acme()).unwrap(), 0);
    }

    #[test]
    fn search_failure_is_not_a_partial_bulk() {
        let mut repo = MockRepository::new();
        repo.expect_search_customers()
            .returning(|_| Err(RepositoryError::Transport("timed out".to_string())));
        repo.expect_disable_customer().never();

        assert!(matches!(
            disable_all(&repo, &acme()),
            Err(ServiceError::Remote(RepositoryError::Transport(_)))
        ));
    }

    #[test]
    fn generic_apply_works_for_any_collection() {
        let mut repo = MockRepository::new();
        repo.expect_search_transactions().returning(|_| {
            Ok(ResultEnvelope::new(
                2,
                vec![
                    Transaction {
                        ref_num: None,
                        customer_id: None,
                        date_time: "2024-03-05 10:00:00".to_string(),
                        status: None,
                        transaction_type: None,
                        amount: 1.0,
                        description: None,
                        card_type: None,
                        error: None,
                    };
                    2
                ],
            )
            .unwrap())
        });
        let mut seen = 0.0;

        let processed = bulk_apply::<Transaction, _, _>(
            &repo,
            SearchCriteria::default(),
            None,
            |_, transaction| {
                seen += transaction.amount;
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(processed, 2);
        assert_eq!(seen, 2.0);
    }
}
