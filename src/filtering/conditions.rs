use sea_orm::{
    Condition,
    sea_query::{BinOper, SelectStatement, SimpleExpr},
};

use super::fields::{comparison, resolve_field};
use crate::{
    config::GridConfig,
    errors::GridError,
    models::{ColumnDescriptor, GridRequest},
};

/// Comparison selected by a leading `[op]` token in a column search value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterOperator {
    /// `[=]`, also used when no token is present
    #[default]
    Equal,
    /// `[!=]`
    NotEqual,
    /// `[%]`, substring match
    Like,
    /// `[<]`
    LessThan,
    /// `[>]`
    GreaterThan,
}

const OPERATOR_TOKENS: [(&str, FilterOperator); 5] = [
    ("[=]", FilterOperator::Equal),
    ("[!=]", FilterOperator::NotEqual),
    ("[%]", FilterOperator::Like),
    ("[<]", FilterOperator::LessThan),
    ("[>]", FilterOperator::GreaterThan),
];

impl FilterOperator {
    const fn bin_oper(self) -> BinOper {
        match self {
            Self::Equal => BinOper::Equal,
            Self::NotEqual => BinOper::NotEqual,
            Self::Like => BinOper::Like,
            Self::LessThan => BinOper::SmallerThan,
            Self::GreaterThan => BinOper::GreaterThan,
        }
    }
}

/// Parse a leading operator token.
///
/// Returns the operator and, when a token was recognised, the text after it.
/// Unrecognised brackets such as `[~]abc` are plain values compared with `=`.
#[must_use]
pub fn parse_operator(value: &str) -> (FilterOperator, Option<&str>) {
    OPERATOR_TOKENS
        .iter()
        .find_map(|(token, operator)| {
            value
                .strip_prefix(token)
                .map(|rest| (*operator, Some(rest)))
        })
        .unwrap_or((FilterOperator::Equal, None))
}

/// A parsed per-column filter: the comparison and the value bound for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnFilter {
    pub operator: FilterOperator,
    pub operand: String,
}

impl ColumnFilter {
    /// Parse a trimmed column search value.
    ///
    /// By default the operand is the whole value, token included, and only the
    /// comparison changes: `[!=]5` compares against `'[!=]5'` and `[%]john`
    /// matches `'%[%]john%'`. With `strip_prefix` a recognised token is removed
    /// first, so `[!=]5` compares against `'5'`.
    #[must_use]
    pub fn parse(value: &str, strip_prefix: bool) -> Self {
        let (operator, rest) = parse_operator(value);
        let base = match rest {
            Some(rest) if strip_prefix => rest,
            _ => value,
        };
        let operand = match operator {
            FilterOperator::Like => format!("%{base}%"),
            _ => base.to_string(),
        };
        Self { operator, operand }
    }
}

/// Build the predicate for one column's own search value.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when the column cannot be resolved
/// to a field.
pub fn build_column_filter(
    config: &GridConfig,
    column: &ColumnDescriptor,
    index: usize,
) -> Result<Option<SimpleExpr>, GridError> {
    let value = column.search_value();
    if !column.searchable || value.is_empty() {
        return Ok(None);
    }

    let field = resolve_field(config, column, index)?;
    let filter = ColumnFilter::parse(value, config.strip_operator_prefix);
    tracing::trace!(column = index, operator = ?filter.operator, "column filter");

    Ok(Some(comparison(
        field,
        filter.operator.bin_oper(),
        filter.operand,
        config.case_insensitive,
    )))
}

/// AND every column filter into `query`, one group per filtered column.
///
/// Returns the number of column filters applied.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when a filtered column cannot be
/// resolved to a field.
pub fn apply_column_filters(
    query: &mut SelectStatement,
    config: &GridConfig,
    request: &GridRequest,
) -> Result<usize, GridError> {
    let mut applied = 0;
    for (index, column) in request.columns.iter().enumerate() {
        if let Some(filter) = build_column_filter(config, column, index)? {
            query.cond_where(Condition::all().add(filter));
            applied += 1;
        }
    }
    Ok(applied)
}
