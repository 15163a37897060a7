use sea_orm::{
    Condition,
    sea_query::{BinOper, SimpleExpr},
};

use super::fields::{comparison, resolve_field};
use crate::{config::GridConfig, errors::GridError, models::GridRequest};

/// Split the global search value into the terms that must all match.
///
/// Without a configured delimiter, or when the delimiter does not occur in the
/// value, the whole value is a single term.
#[must_use]
pub fn search_terms<'v>(value: &'v str, delimiter: Option<&str>) -> Vec<&'v str> {
    match delimiter {
        Some(delimiter) if value.contains(delimiter) => value.split(delimiter).collect(),
        _ => vec![value],
    }
}

/// One OR-group of `field LIKE %term%` across all searchable fields.
fn term_condition(fields: &[SimpleExpr], term: &str, case_insensitive: bool) -> Condition {
    fields.iter().fold(Condition::any(), |any, field| {
        any.add(comparison(
            field.clone(),
            BinOper::Like,
            format!("%{term}%"),
            case_insensitive,
        ))
    })
}

/// Build the condition for the grid-wide search box.
///
/// Every term becomes an OR-group over the searchable columns and the groups
/// are ANDed together. Empty terms (from `"a,,b"` or a trailing delimiter)
/// match everything and contribute no group. Returns `None` when there is
/// nothing to filter on.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when a searchable column cannot be
/// resolved to a field.
pub fn build_global_search(
    config: &GridConfig,
    request: &GridRequest,
) -> Result<Option<Condition>, GridError> {
    let value = request.search_value();
    if value.is_empty() {
        return Ok(None);
    }

    let fields = request
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.searchable)
        .map(|(index, column)| resolve_field(config, column, index))
        .collect::<Result<Vec<_>, _>>()?;
    if fields.is_empty() {
        return Ok(None);
    }

    let condition = search_terms(value, config.delimiter())
        .into_iter()
        .filter(|term| !term.is_empty())
        .fold(Condition::all(), |all, term| {
            all.add(term_condition(&fields, term, config.case_insensitive))
        });

    Ok((!condition.is_empty()).then_some(condition))
}
