use sea_orm::sea_query::SelectStatement;

use super::fields::resolve_field;
use crate::{config::GridConfig, errors::GridError, models::GridRequest};

/// Append one order-by term per sort directive, in request order.
///
/// Columns are resolved through the alias map like every other use of a
/// field. The column's `orderable` flag is informational and not enforced.
///
/// Returns the number of order-by terms added.
///
/// # Errors
///
/// Returns [`GridError::InvalidRequest`] when a directive points past the last
/// column or its column cannot be resolved to a field.
pub fn apply_ordering(
    query: &mut SelectStatement,
    config: &GridConfig,
    request: &GridRequest,
) -> Result<usize, GridError> {
    for directive in &request.order {
        let column = request.columns.get(directive.column).ok_or_else(|| {
            GridError::invalid_request(format!(
                "Sort column {} is out of range for {} columns",
                directive.column,
                request.columns.len()
            ))
        })?;
        let field = resolve_field(config, column, directive.column)?;
        query.order_by_expr(field, directive.dir.into());
    }
    Ok(request.order.len())
}
