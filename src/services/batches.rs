use crate::domain::batch::Batch;
use crate::domain::search::{PageRequest, ResultEnvelope, SearchCriteria};
use crate::repository::BatchReader;
use crate::services::ServiceResult;
use crate::services::search::search;

/// One page of settlement batches, sorted by opening time unless `page` says otherwise.
pub fn list_batches<R>(
    repo: &R,
    criteria: SearchCriteria,
    page: Option<PageRequest>,
) -> ServiceResult<ResultEnvelope<Batch>>
where
    R: BatchReader + ?Sized,
{
    search(repo, criteria, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SearchOperator;
    use crate::repository::mock::MockRepository;

    #[test]
    fn forwards_criteria_with_opened_sort() {
        let mut repo = MockRepository::new();
        repo.expect_search_batches()
            .times(1)
            .withf(|query| {
                query.page.sort() == "opened"
                    && query.criteria.params[0].field == "closed"
                    && query.criteria.params[0].operator == SearchOperator::Gt
            })
            .returning(|_| Ok(ResultEnvelope::empty()));

        let batches = list_batches(
            &repo,
            SearchCriteria::default().param("closed", SearchOperator::Gt, "2024-03-01"),
            None,
        )
        .unwrap();

        assert!(batches.is_empty());
        assert_eq!(batches.matched_count(), Some(0));
    }
}
