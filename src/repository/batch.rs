use crate::domain::batch::Batch;
use crate::domain::search::{ResultEnvelope, SearchQuery, Searchable};
use crate::models::batch::BatchSearchResult;
use crate::models::remote::SearchParams;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BatchReader, RemoteRepository};

impl BatchReader for RemoteRepository {
    fn search_batches(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Batch>> {
        let result: Option<BatchSearchResult> =
            self.call(Batch::KIND.search_operation(), SearchParams::from(query))?;
        match result {
            Some(result) => Ok(ResultEnvelope::try_from(result)?),
            None => Ok(ResultEnvelope::empty()),
        }
    }
}
