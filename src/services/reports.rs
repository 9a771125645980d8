//! Report retrieval: remote request plus transport decoding.

use crate::domain::date::DayDate;
use crate::domain::report::{
    CHECKS_ALL_REPORT, CHECKS_SETTLED_REPORT, CheckSettlement, RETURNED_STATUS, ReportFormat,
    ReportRequest, decode_report, parse_check_report,
};
use crate::repository::TransactionReader;
use crate::services::{ServiceError, ServiceResult};

/// Fetches a single-day report and returns its decoded text.
///
/// A payload that does not decode is [`ServiceError::Decoding`],
/// never a remote failure.
pub fn get_report<R>(
    repo: &R,
    report_type: &str,
    day: &DayDate,
    format: ReportFormat,
) -> ServiceResult<String>
where
    R: TransactionReader + ?Sized,
{
    let request = ReportRequest::for_day(report_type, day, format);
    let encoded = repo.get_transaction_report(&request)?;

    decode_report(&encoded).map_err(|e| {
        log::error!("Failed to decode {report_type} report for {}: {e}", day.as_date_string());
        ServiceError::from(e)
    })
}

/// Checks settled on `day` followed by the checks returned on that day.
pub fn checks_settled_by_date<R>(repo: &R, day: &DayDate) -> ServiceResult<Vec<CheckSettlement>>
where
    R: TransactionReader + ?Sized,
{
    let settled = get_report(repo, CHECKS_SETTLED_REPORT, day, ReportFormat::Csv)?;
    let mut rows = parse_check_report(&settled)?;

    let all = get_report(repo, CHECKS_ALL_REPORT, day, ReportFormat::Csv)?;
    rows.extend(
        parse_check_report(&all)?
            .into_iter()
            .filter(|row| row.status == RETURNED_STATUS),
    );

    Ok(rows)
}
