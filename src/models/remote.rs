//! Request and reply envelopes of the remote JSON binding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::search::SearchQuery;
use crate::domain::session::SecurityToken;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Body posted to the remote endpoint for every operation.
pub struct RemoteRequest<'a, P: Serialize> {
    pub operation: &'a str,
    pub token: &'a SecurityToken,
    pub params: P,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteFault {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteReply {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub fault: Option<RemoteFault>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WireSearchParam<'a> {
    pub field: &'a str,
    #[serde(rename = "Type")]
    pub operator: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
/// Parameters shared by the `search*` operations.
pub struct SearchParams<'a> {
    pub search: Vec<WireSearchParam<'a>>,
    pub match_all: bool,
    pub start: usize,
    pub limit: usize,
    pub sort: &'a str,
}

impl<'a> From<&'a SearchQuery> for SearchParams<'a> {
    fn from(query: &'a SearchQuery) -> Self {
        Self {
            search: query
                .criteria
                .params
                .iter()
                .map(|param| WireSearchParam {
                    field: param.field.as_str(),
                    operator: param.operator.as_str(),
                    value: param.value.as_str(),
                })
                .collect(),
            match_all: query.criteria.match_all,
            start: query.page.offset(),
            limit: query.page.limit(),
            sort: query.page.sort(),
        }
    }
}
