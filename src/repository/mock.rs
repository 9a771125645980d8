//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::batch::Batch;
use crate::domain::customer::{Customer, CustomerUpdate};
use crate::domain::report::ReportRequest;
use crate::domain::search::{ResultEnvelope, SearchQuery};
use crate::domain::transaction::Transaction;
use crate::domain::types::{CustomerNumber, RefNum, UserId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BatchReader, CustomerReader, CustomerWriter, TransactionReader, TransactionWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn search_customer_id(&self, user_id: &UserId) -> RepositoryResult<CustomerNumber>;
        fn get_customer(&self, number: CustomerNumber) -> RepositoryResult<Customer>;
        fn search_customers(
            &self,
            query: &SearchQuery,
        ) -> RepositoryResult<ResultEnvelope<Customer>>;
        fn get_customer_history(
            &self,
            number: CustomerNumber,
        ) -> RepositoryResult<ResultEnvelope<Transaction>>;
    }

    impl CustomerWriter for Repository {
        fn enable_customer(&self, number: CustomerNumber) -> RepositoryResult<()>;
        fn disable_customer(&self, number: CustomerNumber) -> RepositoryResult<()>;
        fn update_customer(
            &self,
            number: CustomerNumber,
            update: &CustomerUpdate,
        ) -> RepositoryResult<bool>;
    }

    impl TransactionReader for Repository {
        fn search_transactions(
            &self,
            query: &SearchQuery,
        ) -> RepositoryResult<ResultEnvelope<Transaction>>;
        fn get_transaction(&self, ref_num: RefNum) -> RepositoryResult<Transaction>;
        fn get_transaction_report(&self, request: &ReportRequest) -> RepositoryResult<String>;
    }

    impl TransactionWriter for Repository {
        fn void_transaction(&self, ref_num: RefNum) -> RepositoryResult<bool>;
    }

    impl BatchReader for Repository {
        fn search_batches(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Batch>>;
    }
}
