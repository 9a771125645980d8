//! Search criteria, paging and result envelopes shared by every resource kind.
//!
//! Nothing here validates field names or operators: the remote service is the
//! only authority on what it can filter by, and unknown values surface as a
//! remote fault.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Field the processor stores the business identifier in.
pub const CUSTOMER_ID_FIELD: &str = "CustomerID";

/// Comparison applied by the remote service to a single search field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    EndsWith,
    Contains,
    DoesNotContain,
    In,
    NotIn,
    /// Operator this layer does not know about, forwarded verbatim.
    Other(String),
}

impl SearchOperator {
    pub fn as_str(&self) -> &str {
        match self {
            SearchOperator::Eq => "eq",
            SearchOperator::Ne => "ne",
            SearchOperator::Gt => "gt",
            SearchOperator::Gte => "gte",
            SearchOperator::Lt => "lt",
            SearchOperator::Lte => "lte",
            SearchOperator::StartsWith => "sw",
            SearchOperator::EndsWith => "ew",
            SearchOperator::Contains => "contains",
            SearchOperator::DoesNotContain => "dnc",
            SearchOperator::In => "in",
            SearchOperator::NotIn => "notin",
            SearchOperator::Other(raw) => raw,
        }
    }
}

impl From<&str> for SearchOperator {
    fn from(value: &str) -> Self {
        match value {
            "eq" => SearchOperator::Eq,
            "ne" => SearchOperator::Ne,
            "gt" => SearchOperator::Gt,
            "gte" => SearchOperator::Gte,
            "lt" => SearchOperator::Lt,
            "lte" => SearchOperator::Lte,
            "sw" => SearchOperator::StartsWith,
            "ew" => SearchOperator::EndsWith,
            "contains" => SearchOperator::Contains,
            "dnc" => SearchOperator::DoesNotContain,
            "in" => SearchOperator::In,
            "notin" => SearchOperator::NotIn,
            other => SearchOperator::Other(other.to_string()),
        }
    }
}

impl From<String> for SearchOperator {
    fn from(value: String) -> Self {
        SearchOperator::from(value.as_str())
    }
}

impl From<SearchOperator> for String {
    fn from(value: SearchOperator) -> Self {
        value.as_str().to_string()
    }
}

impl Display for SearchOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(field, operator, value)` filter triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParam {
    pub field: String,
    pub operator: SearchOperator,
    pub value: String,
}

impl SearchParam {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<SearchOperator>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Ordered filter triples plus the AND (`match_all`) / OR switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub params: Vec<SearchParam>,
    #[serde(default = "default_match_all")]
    pub match_all: bool,
}

fn default_match_all() -> bool {
    true
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            match_all: true,
        }
    }
}

impl SearchCriteria {
    /// Single-field criteria matching every record of a business identifier.
    pub fn for_user_id(user_id: &UserId) -> Self {
        Self::default().param(CUSTOMER_ID_FIELD, SearchOperator::Eq, user_id.as_str())
    }

    pub fn param(
        mut self,
        field: impl Into<String>,
        operator: impl Into<SearchOperator>,
        value: impl Into<String>,
    ) -> Self {
        self.params.push(SearchParam::new(field, operator, value));
        self
    }
}

/// Builds criteria from raw triples without validating fields or operators.
pub fn build_criteria<I, F, O, V>(params: I, match_all: bool) -> SearchCriteria
where
    I: IntoIterator<Item = (F, O, V)>,
    F: Into<String>,
    O: Into<SearchOperator>,
    V: Into<String>,
{
    SearchCriteria {
        params: params
            .into_iter()
            .map(|(field, operator, value)| SearchParam::new(field, operator, value))
            .collect(),
        match_all,
    }
}

/// Remote collections reachable through the paged search operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Customer,
    Transaction,
    Batch,
}

impl ResourceKind {
    /// Sort key used when the caller does not pick one.
    pub const fn default_sort(self) -> &'static str {
        match self {
            ResourceKind::Customer | ResourceKind::Transaction => "created",
            ResourceKind::Batch => "opened",
        }
    }

    /// Name of the remote search operation serving this collection.
    pub const fn search_operation(self) -> &'static str {
        match self {
            ResourceKind::Customer => "searchCustomers",
            ResourceKind::Transaction => "searchTransactions",
            ResourceKind::Batch => "searchBatches",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceKind::Customer => "customer",
            ResourceKind::Transaction => "transaction",
            ResourceKind::Batch => "batch",
        };
        f.write_str(label)
    }
}

/// Records reachable through a paged remote search.
pub trait Searchable: Sized {
    const KIND: ResourceKind;
}

/// Window and ordering of a single remote search call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    offset: usize,
    limit: usize,
    sort: String,
}

impl PageRequest {
    /// Rejects a zero limit; the upper bound is left to the remote service.
    pub fn new(
        offset: usize,
        limit: usize,
        sort: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        if limit == 0 {
            return Err(TypeConstraintError::InvalidValue(
                "page limit must be positive".to_string(),
            ));
        }
        Ok(Self {
            offset,
            limit,
            sort: sort.into(),
        })
    }

    /// First page with the default limit and the collection's default sort.
    pub fn first(kind: ResourceKind) -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
            sort: kind.default_sort().to_string(),
        }
    }

    /// The page directly after this one, same limit and sort.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
            sort: self.sort.clone(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }
}

/// Criteria plus paging, the full argument set of a remote search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub criteria: SearchCriteria,
    pub page: PageRequest,
}

impl SearchQuery {
    pub fn new(criteria: SearchCriteria, page: PageRequest) -> Self {
        Self { criteria, page }
    }
}

/// One page of search results in the order the remote service delivered them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    returned_count: usize,
    matched_count: Option<usize>,
    items: Vec<T>,
}

impl<T> ResultEnvelope<T> {
    /// Accepts the page only when `returned_count` matches the delivered items.
    pub fn new(returned_count: usize, items: Vec<T>) -> Result<Self, TypeConstraintError> {
        if returned_count != items.len() {
            return Err(TypeConstraintError::EnvelopeCountMismatch {
                reported: returned_count,
                actual: items.len(),
            });
        }
        Ok(Self {
            returned_count,
            matched_count: None,
            items,
        })
    }

    pub fn empty() -> Self {
        Self {
            returned_count: 0,
            matched_count: Some(0),
            items: Vec::new(),
        }
    }

    /// Records the total number of matches the remote service reported.
    pub fn with_matched(mut self, matched_count: usize) -> Self {
        self.matched_count = Some(matched_count);
        self
    }

    pub fn returned_count(&self) -> usize {
        self.returned_count
    }

    pub fn matched_count(&self) -> Option<usize> {
        self.matched_count
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Whether matches exist past this page. Unknown totals count as exhausted.
    pub fn has_more(&self, page: &PageRequest) -> bool {
        self.matched_count.is_some_and(|matched| {
            page.offset().saturating_add(self.returned_count) < matched
        })
    }
}

impl<T> IntoIterator for ResultEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_criteria_keeps_single_triple_and_and_semantics() {
        let criteria = build_criteria([("CustomerID", "eq", "acme")], true);

        assert!(criteria.match_all);
        assert_eq!(
            criteria.params,
            vec![SearchParam::new("CustomerID", SearchOperator::Eq, "acme")]
        );
    }

    #[test]
    fn unknown_operators_pass_through() {
        let criteria = build_criteria([("Bogus", "near", "x")], false);

        assert!(!criteria.match_all);
        assert_eq!(
            criteria.params[0].operator,
            SearchOperator::Other("near".to_string())
        );
        assert_eq!(criteria.params[0].operator.as_str(), "near");
    }

    #[test]
    fn for_user_id_matches_customer_id_field() {
        let user_id = UserId::new("acme").unwrap();
        let criteria = SearchCriteria::for_user_id(&user_id);

        assert!(criteria.match_all);
        assert_eq!(criteria.params.len(), 1);
        assert_eq!(criteria.params[0].field, CUSTOMER_ID_FIELD);
        assert_eq!(criteria.params[0].value, "acme");
    }

    #[test]
    fn default_pages_follow_resource_kind() {
        let customers = PageRequest::first(ResourceKind::Customer);
        assert_eq!(customers.offset(), 0);
        assert_eq!(customers.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(customers.sort(), "created");
        assert_eq!(PageRequest::first(ResourceKind::Transaction).sort(), "created");
        assert_eq!(PageRequest::first(ResourceKind::Batch).sort(), "opened");
    }

    #[test]
    fn page_rejects_zero_limit() {
        assert!(PageRequest::new(0, 0, "created").is_err());
        let next = PageRequest::new(0, 25, "created").unwrap().next();
        assert_eq!(next.offset(), 25);
        assert_eq!(next.limit(), 25);
    }

    #[test]
    fn envelope_enforces_returned_count() {
        assert_eq!(
            ResultEnvelope::new(2, vec![1]),
            Err(TypeConstraintError::EnvelopeCountMismatch {
                reported: 2,
                actual: 1
            })
        );
        let envelope = ResultEnvelope::new(3, vec![3, 1, 2]).unwrap();
        assert_eq!(envelope.items(), &[3, 1, 2]);
    }

    #[test]
    fn has_more_uses_matched_total() {
        let page = PageRequest::new(0, 2, "created").unwrap();
        let envelope = ResultEnvelope::new(2, vec!['a', 'b']).unwrap();
        assert!(!envelope.has_more(&page));

        let envelope = envelope.with_matched(5);
        assert!(envelope.has_more(&page));
        assert!(!envelope.has_more(&PageRequest::new(3, 2, "created").unwrap()));
    }

    #[test]
    fn paging_near_usize_max_saturates() {
        let page = PageRequest::new(usize::MAX - 1, 100, "created").unwrap();

        assert_eq!(page.next().offset(), usize::MAX);

        let envelope = ResultEnvelope::new(2, vec![1, 2]).unwrap().with_matched(usize::MAX);
        assert!(!envelope.has_more(&page));
    }
}
