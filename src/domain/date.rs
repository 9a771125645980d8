//! Calendar-day inputs as the remote service expects them.
//!
//! Components are kept as the caller supplied them. `"13"` is a perfectly good
//! month here; the remote service decides what to do with it.

use serde::{Deserialize, Serialize};

use crate::domain::search::{SearchCriteria, SearchOperator};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DayDate {
    pub fn new(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    /// `{year}-{month}-{day}`, the single-day form used by report requests.
    pub fn as_date_string(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }

    pub fn range(&self) -> DateRange {
        let date = self.as_date_string();
        DateRange {
            start: format!("{date} 00:00:00"),
            end: format!("{date} 23:59:59"),
        }
    }
}

/// Inclusive start/end timestamps covering one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// `field gte start AND field lte end`.
    pub fn to_criteria(&self, field: &str) -> SearchCriteria {
        SearchCriteria::default()
            .param(field, SearchOperator::Gte, self.start.as_str())
            .param(field, SearchOperator::Lte, self.end.as_str())
    }
}

pub fn day_range(
    year: impl Into<String>,
    month: impl Into<String>,
    day: impl Into<String>,
) -> DateRange {
    DayDate::new(year, month, day).range()
}
