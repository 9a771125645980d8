//! Relay gateway: named method calls over a ZeroMQ REP socket.
//!
//! Each request is a single JSON message and gets exactly one reply. Requests
//! are served one at a time; the repository is shared read-only.

use serde::Serialize;

use crate::domain::batch::Batch;
use crate::domain::customer::Customer;
use crate::domain::date::{DayDate, day_range};
use crate::domain::report::ReportFormat;
use crate::domain::search::{PageRequest, ResourceKind, SearchCriteria, build_criteria};
use crate::domain::transaction::Transaction;
use crate::dto::gateway::{CustomerHistory, GatewayReply, GatewayRequest, PageParams, SearchPage};
use crate::repository::{
    BatchReader, CustomerReader, CustomerWriter, TransactionReader, TransactionWriter,
};
use crate::services::{ServiceResult, batches, bulk, customers, reports, search, transactions};

fn reply<T: Serialize>(result: ServiceResult<T>) -> GatewayReply {
    match result {
        Ok(value) => GatewayReply::ok(&value),
        Err(e) => {
            log::error!("Gateway call failed: {e}");
            GatewayReply::from(e)
        }
    }
}

fn page_for(params: Option<PageParams>, kind: ResourceKind) -> ServiceResult<Option<PageRequest>> {
    Ok(params.map(|params| params.into_page(kind)).transpose()?)
}

fn search_kind<R>(
    repo: &R,
    kind: ResourceKind,
    criteria: SearchCriteria,
    page: Option<PageParams>,
) -> GatewayReply
where
    R: CustomerReader + TransactionReader + BatchReader + ?Sized,
{
    let page = match page_for(page, kind) {
        Ok(page) => page.unwrap_or_else(|| PageRequest::first(kind)),
        Err(e) => return GatewayReply::from(e),
    };
    match kind {
        ResourceKind::Customer => reply(
            search::search::<Customer, _>(repo, criteria, Some(page.clone()))
                .map(|envelope| SearchPage::new(envelope, &page)),
        ),
        ResourceKind::Transaction => reply(
            search::search::<Transaction, _>(repo, criteria, Some(page.clone()))
                .map(|envelope| SearchPage::new(envelope, &page)),
        ),
        ResourceKind::Batch => reply(
            search::search::<Batch, _>(repo, criteria, Some(page.clone()))
                .map(|envelope| SearchPage::new(envelope, &page)),
        ),
    }
}

/// Executes one relay request against `repo` and builds its reply.
///
/// Report requests without an explicit format use `default_format`.
pub fn dispatch<R>(repo: &R, request: GatewayRequest, default_format: ReportFormat) -> GatewayReply
where
    R: CustomerReader + CustomerWriter + TransactionReader + TransactionWriter + BatchReader + ?Sized,
{
    match request {
        GatewayRequest::BuildCriteria { params, match_all } => GatewayReply::ok(&build_criteria(
            params.into_iter().map(|p| (p.field, p.operator, p.value)),
            match_all,
        )),
        GatewayRequest::DayRange { year, month, day } => {
            GatewayReply::ok(&day_range(year, month, day))
        }
        GatewayRequest::Search {
            kind,
            criteria,
            page,
        } => search_kind(repo, kind, criteria, page),
        GatewayRequest::Resolve { user_id } => {
            reply(customers::resolve_customer_number(repo, &user_id))
        }
        GatewayRequest::GetCustomer { user_id } => reply(customers::get_customer(repo, &user_id)),
        GatewayRequest::SearchCustomersById { user_id, page } => reply(
            page_for(page, ResourceKind::Customer)
                .and_then(|page| customers::search_customers_by_id(repo, &user_id, page)),
        ),
        GatewayRequest::GetAllCustomers { user_id } => {
            reply(customers::get_all_customers(repo, &user_id))
        }
        GatewayRequest::ListEnabledCustomers => reply(customers::list_enabled_customers(repo)),
        GatewayRequest::AutoBillEnabled { user_id } => {
            reply(customers::auto_bill_enabled(repo, &user_id))
        }
        GatewayRequest::EnableCustomer { user_id } => {
            reply(customers::enable_customer(repo, &user_id))
        }
        GatewayRequest::DisableCustomer { user_id } => {
            reply(customers::disable_customer(repo, &user_id))
        }
        GatewayRequest::DisableCustomerNumber { number } => {
            reply(customers::disable_customer_number(repo, number))
        }
        GatewayRequest::UpdateCustomer { number, fields } => {
            reply(customers::update_customer(repo, number, &fields))
        }
        GatewayRequest::UpdateRecurring { number, update } => {
            reply(customers::update_recurring(repo, number, update))
        }
        GatewayRequest::CustomerHistory { number } => {
            reply(customers::customer_history(repo, number))
        }
        GatewayRequest::HistoryFor { user_id } => reply(
            customers::history_for(repo, &user_id).map(|pairs| {
                pairs
                    .into_iter()
                    .map(CustomerHistory::from)
                    .collect::<Vec<_>>()
            }),
        ),
        GatewayRequest::DisableAll { user_id, page } => reply(
            page_for(page, ResourceKind::Customer)
                .and_then(|page| bulk::disable_all_on_page(repo, &user_id, page)),
        ),
        GatewayRequest::TransactionsForDay {
            year,
            month,
            day,
            page,
        } => reply(page_for(page, ResourceKind::Transaction).and_then(|page| {
            transactions::transactions_for_day(repo, &DayDate::new(year, month, day), page)
        })),
        GatewayRequest::GetTransaction { ref_num } => {
            reply(transactions::get_transaction(repo, ref_num))
        }
        GatewayRequest::VoidTransaction { user_id, ref_num } => {
            reply(transactions::void_transaction(repo, &user_id, ref_num))
        }
        GatewayRequest::ListBatches { criteria, page } => reply(
            page_for(page, ResourceKind::Batch)
                .and_then(|page| batches::list_batches(repo, criteria, page)),
        ),
        GatewayRequest::GetReport {
            report_type,
            year,
            month,
            day,
            format,
        } => reply(reports::get_report(
            repo,
            &report_type,
            &DayDate::new(year, month, day),
            format.unwrap_or(default_format),
        )),
        GatewayRequest::ChecksSettledByDate { year, month, day } => reply(
            reports::checks_settled_by_date(repo, &DayDate::new(year, month, day)),
        ),
    }
}

/// Decodes one raw message, dispatches it and encodes the reply.
///
/// Messages that are not a valid request get a `BadRequest` reply.
pub fn handle_message<R>(repo: &R, message: &[u8], default_format: ReportFormat) -> Vec<u8>
where
    R: CustomerReader + CustomerWriter + TransactionReader + TransactionWriter + BatchReader + ?Sized,
{
    let reply = match serde_json::from_slice::<GatewayRequest>(message) {
        Ok(request) => {
            log::debug!("Dispatching {request:?}");
            dispatch(repo, request, default_format)
        }
        Err(e) => {
            log::warn!("Rejecting malformed gateway request: {e}");
            GatewayReply::bad_request(e.to_string())
        }
    };

    serde_json::to_vec(&reply).unwrap_or_else(|e| {
        log::error!("Failed to encode gateway reply: {e}");
        br#"{"status":"error","kind":"EncodingFailure","message":"reply encoding failed"}"#.to_vec()
    })
}

/// Serves requests on a bound REP socket until receiving or replying fails.
pub fn serve<R>(socket: &zmq::Socket, repo: &R, default_format: ReportFormat) -> zmq::Result<()>
where
    R: CustomerReader + CustomerWriter + TransactionReader + TransactionWriter + BatchReader + ?Sized,
{
    loop {
        let message = socket.recv_bytes(0)?;
        let reply = handle_message(repo, &message, default_format);
        socket.send(reply, 0)?;
    }
}
