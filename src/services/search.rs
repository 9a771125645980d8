use crate::domain::search::{PageRequest, ResultEnvelope, SearchCriteria, SearchQuery, Searchable};
use crate::repository::Searcher;
use crate::services::{ServiceError, ServiceResult};

/// Runs one paged remote search for the collection of `T`.
///
/// Without an explicit page the first page of the collection's defaults is
/// requested. Items come back in remote order; a zero-item page is a normal
/// result. Failures propagate without retry.
pub fn search<T, R>(
    repo: &R,
    criteria: SearchCriteria,
    page: Option<PageRequest>,
) -> ServiceResult<ResultEnvelope<T>>
where
    T: Searchable,
    R: Searcher<T> + ?Sized,
{
    let page = page.unwrap_or_else(|| PageRequest::first(T::KIND));
    let query = SearchQuery::new(criteria, page);

    let envelope = <R as Searcher<T>>::search(repo, &query).map_err(ServiceError::from)?;
    log::debug!(
        "{} search returned {} item(s)",
        T::KIND,
        envelope.returned_count()
    );
    Ok(envelope)
}
