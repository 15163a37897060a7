use sea_orm::sea_query::{Alias, BinOper, Expr, Func, SimpleExpr};

use crate::{config::GridConfig, errors::GridError, models::ColumnDescriptor};

/// Check that a client-supplied field is a plain identifier
fn is_identifier(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build a quoted column reference from `column` or `table.column`.
fn column_reference(field: &str) -> Option<SimpleExpr> {
    let mut parts = field.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(column), None, None) if is_identifier(column) => {
            Some(Expr::col(Alias::new(column)).into())
        }
        (Some(table), Some(column), None) if is_identifier(table) && is_identifier(column) => {
            Some(Expr::col((Alias::new(table), Alias::new(column))).into())
        }
        _ => None,
    }
}

/// Resolve the SQL expression a grid column stands for.
///
/// Called at every point of use (search, filter, ordering) so the request is
/// never rewritten. Configured aliases are trusted and emitted verbatim; any
/// other field name comes from the client and must be an identifier path.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when the column lacks the configured
/// field attribute or names something other than a column.
pub fn resolve_field(
    config: &GridConfig,
    column: &ColumnDescriptor,
    index: usize,
) -> Result<SimpleExpr, GridError> {
    let field = column.field(config.field_selector).ok_or_else(|| {
        GridError::invalid_request(format!(
            "Column {index} has no `{}` attribute",
            config.field_selector
        ))
    })?;

    if let Some(expression) = config.alias_for(field) {
        return Ok(SimpleExpr::Custom(expression.to_string()));
    }

    column_reference(field).ok_or_else(|| {
        GridError::invalid_request(format!("Column {index} field `{field}` is not a valid column name"))
    })
}

fn lower(expr: SimpleExpr) -> SimpleExpr {
    SimpleExpr::FunctionCall(Func::lower(expr))
}

/// `field <op> operand`, with both sides wrapped in `LOWER(..)` when the
/// grid is case-insensitive. The operand is always a bound value.
pub(crate) fn comparison(
    field: SimpleExpr,
    operator: BinOper,
    operand: String,
    case_insensitive: bool,
) -> SimpleExpr {
    let value = SimpleExpr::Value(operand.into());
    if case_insensitive {
        SimpleExpr::Binary(Box::new(lower(field)), operator, Box::new(lower(value)))
    } else {
        SimpleExpr::Binary(Box::new(field), operator, Box::new(value))
    }
}
