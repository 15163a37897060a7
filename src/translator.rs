use sea_orm::sea_query::SelectStatement;

use crate::{
    config::GridConfig,
    engine::{QueryEngine, count_statement},
    errors::GridError,
    filtering::{apply_ordering, apply_pagination, apply_search_filters, page_limit},
    models::{GridRequest, GridResponse},
};

fn log_rejection(err: &GridError) {
    if let GridError::InvalidRequest { message } = err {
        tracing::warn!(error = %message, "Rejected grid request");
    }
}

/// Answers one grid request against one base query.
///
/// The base query describes "all rows" and is never modified: every
/// operation works on its own clone, so the operations can be called in any
/// order and repeatedly with the same results. Create one `GridQuery` per
/// request and drop it once the response is built.
///
/// Search predicates are ANDed onto any `WHERE` clause the base query
/// already has.
///
/// ```rust,ignore
/// let config = GridConfig::new()
///     .with_column_alias("name", "u.full_name")
///     .with_case_insensitive(true);
/// let engine = ConnectionEngine::new(&db);
/// let response = config
///     .translate(&engine, users::Entity::find().into_query(), &request)
///     .build_response()
///     .await?;
/// ```
pub struct GridQuery<'a, E> {
    engine: &'a E,
    config: &'a GridConfig,
    query: SelectStatement,
    request: &'a GridRequest,
}

impl GridConfig {
    /// Start answering `request` against `query` with this configuration.
    pub fn translate<'a, E>(
        &'a self,
        engine: &'a E,
        query: SelectStatement,
        request: &'a GridRequest,
    ) -> GridQuery<'a, E>
    where
        E: QueryEngine,
    {
        GridQuery::new(engine, self, query, request)
    }
}

impl<'a, E> GridQuery<'a, E>
where
    E: QueryEngine,
{
    pub fn new(
        engine: &'a E,
        config: &'a GridConfig,
        query: SelectStatement,
        request: &'a GridRequest,
    ) -> Self {
        Self {
            engine,
            config,
            query,
            request,
        }
    }

    /// Replace the base query.
    #[must_use]
    pub fn with_query(mut self, query: SelectStatement) -> Self {
        self.query = query;
        self
    }

    /// Replace the request being answered.
    #[must_use]
    pub fn with_request(mut self, request: &'a GridRequest) -> Self {
        self.request = request;
        self
    }

    /// A copy of the base query with the global search and column filters
    /// applied. No ordering or pagination.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRequest`] when a searched column cannot be
    /// resolved to a field.
    pub fn build_filtered_query(&self) -> Result<SelectStatement, GridError> {
        let mut query = self.query.clone();
        apply_search_filters(&mut query, self.config, self.request).inspect_err(log_rejection)?;
        Ok(query)
    }

    /// The filtered query with ordering, offset and limit applied.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRequest`] for out-of-range sort columns and
    /// columns that cannot be resolved to a field.
    pub fn build_page_query(&self) -> Result<SelectStatement, GridError> {
        let mut query = self.build_filtered_query()?;
        let order_terms =
            apply_ordering(&mut query, self.config, self.request).inspect_err(log_rejection)?;
        apply_pagination(&mut query, self.request.start, self.request.length);

        tracing::debug!(
            order_terms,
            start = ?self.request.start,
            limit = ?page_limit(self.request.length),
            "built grid page query"
        );
        Ok(query)
    }

    /// Fetch the requested page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRequest`] for a malformed request and
    /// [`GridError::Database`] when the engine fails.
    pub async fn fetch_page(&self) -> Result<Vec<E::Row>, GridError> {
        let query = self.build_page_query()?;
        let rows = self
            .engine
            .fetch_rows(query, self.config.result_mode)
            .await?;
        tracing::debug!(rows = rows.len(), "fetched grid page");
        Ok(rows)
    }

    /// Count the rows matching the search predicates, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRequest`] for a malformed request and
    /// [`GridError::Database`] when the engine fails.
    pub async fn count_filtered(&self) -> Result<u64, GridError> {
        let query = count_statement(self.build_filtered_query()?, &self.config.count_expression);
        let count = self.engine.fetch_count(query).await?;
        tracing::debug!(count, "counted filtered grid rows");
        Ok(count)
    }

    /// Count every row of the base query.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Database`] when the engine fails.
    pub async fn count_total(&self) -> Result<u64, GridError> {
        let query = count_statement(self.query.clone(), &self.config.count_expression);
        let count = self.engine.fetch_count(query).await?;
        tracing::debug!(count, "counted total grid rows");
        Ok(count)
    }

    /// Build the full response envelope.
    ///
    /// Fails as a whole if any of the page fetch or the two counts fails.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidRequest`] for a malformed request and
    /// [`GridError::Database`] when the engine fails.
    pub async fn build_response(&self) -> Result<GridResponse<E::Row>, GridError> {
        let data = self.fetch_page().await?;
        let records_filtered = self.count_filtered().await?;
        let records_total = self.count_total().await?;

        tracing::debug!(
            draw = %self.request.draw,
            rows = data.len(),
            records_filtered,
            records_total,
            "built grid response"
        );
        Ok(GridResponse {
            data,
            draw: self.request.draw.clone(),
            records_filtered,
            records_total,
        })
    }
}
