//! Transaction reports and their transport encoding.
//!
//! The remote service ships report files base64-encoded. Decoding is strict:
//! anything that is not valid base64 of UTF-8 text is a [`ReportDecodeError`].

use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::date::DayDate;

pub const CHECKS_SETTLED_REPORT: &str = "check:settled by date";
pub const CHECKS_ALL_REPORT: &str = "check:All Transactions by Date";

/// Status marking a returned check in the all-transactions report.
pub const RETURNED_STATUS: &str = "Returned";

#[derive(Debug, Error)]
pub enum ReportDecodeError {
    #[error("report payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("report payload is not UTF-8 text: {0}")]
    Text(#[from] std::string::FromUtf8Error),
    #[error("malformed report row {row}: {reason}")]
    Row { row: usize, reason: String },
}

/// File format requested from the remote report generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Tab,
    Html,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Tab => "tab",
            ReportFormat::Html => "html",
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of a remote report request covering a single day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub report_type: String,
    pub start_date: String,
    pub end_date: String,
    pub format: ReportFormat,
}

impl ReportRequest {
    pub fn for_day(report_type: impl Into<String>, day: &DayDate, format: ReportFormat) -> Self {
        let date = day.as_date_string();
        Self {
            report_type: report_type.into(),
            start_date: date.clone(),
            end_date: date,
            format,
        }
    }
}

/// Reverses the transport encoding of a report payload.
///
/// Line breaks inside the payload are ignored; the remote service wraps long
/// base64 bodies.
pub fn decode_report(encoded: &str) -> Result<String, ReportDecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// Inverse of [`decode_report`].
pub fn encode_report(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// One row of the check settlement reports.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckSettlement {
    pub date: String,
    pub name: String,
    pub status: String,
    pub amount: String,
    pub processed: String,
}

const DATE_COLUMN: usize = 1;
const NAME_COLUMN: usize = 2;
const STATUS_COLUMN: usize = 9;
const AMOUNT_COLUMN: usize = 10;
const PROCESSED_COLUMN: usize = 13;

/// Parses a CSV check report, skipping the header row.
pub fn parse_check_report(text: &str) -> Result<Vec<CheckSettlement>, ReportDecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| ReportDecodeError::Row {
            row,
            reason: e.to_string(),
        })?;
        let column = |i: usize| {
            record
                .get(i)
                .map(str::to_string)
                .ok_or_else(|| ReportDecodeError::Row {
                    row,
                    reason: format!("missing column {i}"),
                })
        };
        rows.push(CheckSettlement {
            date: column(DATE_COLUMN)?,
            name: column(NAME_COLUMN)?,
            status: column(STATUS_COLUMN)?,
            amount: column(AMOUNT_COLUMN)?,
            processed: column(PROCESSED_COLUMN)?,
        });
    }

    Ok(rows)
}
