use sea_orm::sea_query::SelectStatement;

/// Page size requested by the grid, `None` when the page is unbounded.
///
/// Grids send `-1` for "show all"; zero is treated the same way.
#[must_use]
pub fn page_limit(length: Option<i64>) -> Option<u64> {
    length
        .and_then(|length| u64::try_from(length).ok())
        .filter(|length| *length > 0)
}

/// Largest limit or offset every supported backend accepts.
const UNBOUNDED_LIMIT: u64 = i64::MAX.unsigned_abs();

/// Apply the absolute row offset and the page size cap to `query`.
///
/// An offset without a page size still gets a limit since `SQLite` and
/// `MySQL` only accept `OFFSET` after `LIMIT`. Offsets are capped at
/// `i64::MAX`, which is past the last row of any table.
pub fn apply_pagination(query: &mut SelectStatement, start: Option<u64>, length: Option<i64>) {
    let limit = page_limit(length);
    if let Some(start) = start {
        query.offset(start.min(UNBOUNDED_LIMIT));
        query.limit(limit.unwrap_or(UNBOUNDED_LIMIT));
    } else if let Some(limit) = limit {
        query.limit(limit);
    }
}
