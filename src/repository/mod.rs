use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::batch::Batch;
use crate::domain::customer::{Customer, CustomerUpdate};
use crate::domain::report::ReportRequest;
use crate::domain::search::{ResultEnvelope, SearchQuery};
use crate::domain::session::{Credentials, SecurityToken, Session};
use crate::domain::transaction::Transaction;
use crate::domain::types::{CustomerNumber, RefNum, UserId};
use crate::models::remote::{RemoteReply, RemoteRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod batch;
pub mod customer;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod transaction;

/// Operation used to verify a freshly issued token.
const LOGIN_PROBE_OPERATION: &str = "getAccountDetails";

pub trait CustomerReader {
    /// Maps a business identifier to the processor's customer number.
    ///
    /// Returns [`RepositoryError::NotFound`] when the processor has no match.
    fn search_customer_id(&self, user_id: &UserId) -> RepositoryResult<CustomerNumber>;
    fn get_customer(&self, number: CustomerNumber) -> RepositoryResult<Customer>;
    fn search_customers(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Customer>>;
    fn get_customer_history(
        &self,
        number: CustomerNumber,
    ) -> RepositoryResult<ResultEnvelope<Transaction>>;
}

pub trait CustomerWriter {
    fn enable_customer(&self, number: CustomerNumber) -> RepositoryResult<()>;
    fn disable_customer(&self, number: CustomerNumber) -> RepositoryResult<()>;
    fn update_customer(
        &self,
        number: CustomerNumber,
        update: &CustomerUpdate,
    ) -> RepositoryResult<bool>;
}

pub trait TransactionReader {
    fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> RepositoryResult<ResultEnvelope<Transaction>>;
    fn get_transaction(&self, ref_num: RefNum) -> RepositoryResult<Transaction>;
    /// Returns the report body still in its transport encoding.
    fn get_transaction_report(&self, request: &ReportRequest) -> RepositoryResult<String>;
}

pub trait TransactionWriter {
    fn void_transaction(&self, ref_num: RefNum) -> RepositoryResult<bool>;
}

pub trait BatchReader {
    fn search_batches(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Batch>>;
}

/// Paged search over one collection, dispatched by record type.
pub trait Searcher<T> {
    fn search(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<T>>;
}

impl<R> Searcher<Customer> for R
where
    R: CustomerReader + ?Sized,
{
    fn search(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Customer>> {
        self.search_customers(query)
    }
}

impl<R> Searcher<Transaction> for R
where
    R: TransactionReader + ?Sized,
{
    fn search(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Transaction>> {
        self.search_transactions(query)
    }
}

impl<R> Searcher<Batch> for R
where
    R: BatchReader + ?Sized,
{
    fn search(&self, query: &SearchQuery) -> RepositoryResult<ResultEnvelope<Batch>> {
        self.search_batches(query)
    }
}

/// Remote payment service reached over its JSON binding.
///
/// Cloning is cheap; clones share the HTTP connection pool and the session.
#[derive(Clone)]
pub struct RemoteRepository {
    http: HttpClient,
    session: Arc<Session>,
}

impl RemoteRepository {
    /// Issues a token for `credentials` and verifies it against the service.
    ///
    /// Any failure of the verification call is reported as
    /// [`RepositoryError::Authentication`].
    pub fn connect(
        credentials: &Credentials,
        client_ip: &str,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let seed = rand::random::<u32>().to_string();
        let token = SecurityToken::issue(credentials, &seed, client_ip);
        let repo = Self::with_session(Session::new(&credentials.endpoint, token), timeout)?;

        repo.call::<_, Value>(LOGIN_PROBE_OPERATION, json!({}))
            .map_err(|e| RepositoryError::Authentication(e.to_string()))?;

        log::info!("Authenticated against {}", credentials.endpoint);
        Ok(repo)
    }

    /// Wraps an existing session without contacting the service.
    pub fn with_session(session: Session, timeout: Duration) -> RepositoryResult<Self> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            session: Arc::new(session),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Invokes a named remote operation. `Ok(None)` means an empty result.
    fn call<P, T>(&self, operation: &str, params: P) -> RepositoryResult<Option<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        log::debug!("Remote call {operation}");

        let request = RemoteRequest {
            operation,
            token: self.session.token(),
            params,
        };

        let response = self
            .http
            .post(self.session.endpoint())
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let reply: RemoteReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(RepositoryError::Transport(format!(
                    "{operation} failed with HTTP {status}"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(fault) = reply.fault {
            log::warn!("Remote fault on {operation}: {} {}", fault.code, fault.message);
            return Err(fault.into());
        }
        if !status.is_success() {
            return Err(RepositoryError::Transport(format!(
                "{operation} failed with HTTP {status}"
            )));
        }

        match reply.result {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Like [`Self::call`] but treats an empty result as a protocol error.
    fn call_required<P, T>(&self, operation: &str, params: P) -> RepositoryResult<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        self.call(operation, params)?.ok_or_else(|| {
            RepositoryError::Protocol(format!("{operation} returned an empty result"))
        })
    }
}
