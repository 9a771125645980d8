//! Wire models of the remote payment service and typed configuration.

use crate::domain::search::ResultEnvelope;
use crate::domain::types::TypeConstraintError;

pub mod batch;
pub mod config;
pub mod customer;
pub mod remote;
pub mod transaction;

/// Converts a wire search page into a domain envelope, preserving item order.
///
/// A missing item list is only acceptable when the page reports zero items.
pub(crate) fn into_envelope<W, T>(
    returned: usize,
    matched: Option<usize>,
    items: Option<Vec<W>>,
) -> Result<ResultEnvelope<T>, TypeConstraintError>
where
    T: TryFrom<W, Error = TypeConstraintError>,
{
    let items = items
        .unwrap_or_default()
        .into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<T>, _>>()?;

    let envelope = ResultEnvelope::new(returned, items)?;
    Ok(match matched {
        Some(matched) => envelope.with_matched(matched),
        None => envelope,
    })
}
