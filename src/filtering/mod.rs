//! # Grid Request Translation
//!
//! Turns the search, filter, sort and paging parts of a [`GridRequest`] into
//! clauses on a Sea-Query [`SelectStatement`].
//!
//! ## Global search
//! `search.value` becomes `field LIKE '%value%'` ORed across every searchable
//! column. With a search delimiter configured, `"a,b"` becomes one such
//! OR-group per term and the groups are ANDed:
//!
//! ```sql
//! WHERE (first LIKE '%a%' OR last LIKE '%a%') AND (first LIKE '%b%' OR last LIKE '%b%')
//! ```
//!
//! ## Column filters
//! A searchable column's own `search.value` filters that column. A leading
//! token picks the comparison:
//!
//! | Value     | Predicate       |
//! |-----------|-----------------|
//! | `paris`   | `city = ?`      |
//! | `[=]x`    | `city = ?`      |
//! | `[!=]x`   | `city <> ?`     |
//! | `[%]x`    | `city LIKE ?`   |
//! | `[<]x`    | `city < ?`      |
//! | `[>]x`    | `city > ?`      |
//!
//! See [`ColumnFilter::parse`] for what is bound for `?`.
//!
//! ## Fields
//! Every use of a column goes through [`resolve_field`], which applies the
//! configured alias map. With `case_insensitive` both sides of search and
//! filter comparisons are wrapped in `LOWER(..)`.
//!
//! [`GridRequest`]: crate::models::GridRequest
//! [`SelectStatement`]: sea_orm::sea_query::SelectStatement

pub mod conditions;
pub mod fields;
pub mod pagination;
pub mod search;
pub mod sort;

use sea_orm::sea_query::SelectStatement;

use crate::{config::GridConfig, errors::GridError, models::GridRequest};

pub use conditions::{ColumnFilter, FilterOperator, apply_column_filters, build_column_filter, parse_operator};
pub use fields::resolve_field;
pub use pagination::{apply_pagination, page_limit};
pub use search::{build_global_search, search_terms};
pub use sort::apply_ordering;

/// AND the global search and every column filter into `query`.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when a column used for searching
/// cannot be resolved to a field.
pub fn apply_search_filters(
    query: &mut SelectStatement,
    config: &GridConfig,
    request: &GridRequest,
) -> Result<(), GridError> {
    let global = build_global_search(config, request)?;
    let searched = global.is_some();
    if let Some(condition) = global {
        query.cond_where(condition);
    }
    let filtered = apply_column_filters(query, config, request)?;

    tracing::debug!(
        columns = request.columns.len(),
        global_search = searched,
        column_filters = filtered,
        "applied grid search filters"
    );
    Ok(())
}
