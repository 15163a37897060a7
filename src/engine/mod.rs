//! # Query Engines
//!
//! The translator only builds [`SelectStatement`]s. Running them is the job of
//! a [`QueryEngine`], which performs exactly one database round-trip per call
//! and leaves retries and timeouts to the connection underneath.
//!
//! Two adapters are provided:
//! - [`ConnectionEngine`] runs statements on any Sea-ORM connection and
//!   returns rows as JSON objects keyed by column name
//! - [`EntityEngine`] additionally hydrates rows into an entity's `Model`
//!   when the grid is configured with [`ResultMode::Object`]

mod connection;
mod entity;

pub use connection::ConnectionEngine;
pub use entity::{EntityEngine, EntityRow};

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbErr,
    sea_query::{Alias, SelectStatement, SimpleExpr},
};
use serde::Serialize;

use crate::config::ResultMode;

/// Column alias given to the count aggregate.
pub const COUNT_ALIAS: &str = "num_rows";

#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// One row of a fetched page.
    type Row: Serialize + Send;

    /// Execute `query` and return every row it yields.
    async fn fetch_rows(
        &self,
        query: SelectStatement,
        mode: ResultMode,
    ) -> Result<Vec<Self::Row>, DbErr>;

    /// Execute a statement built by [`count_statement`] and return the count.
    async fn fetch_count(&self, query: SelectStatement) -> Result<u64, DbErr>;
}

/// Replace the projection of `query` with `COUNT(expression)`.
///
/// Ordering, offset and limit are dropped as well. Some backends reject
/// ordering by non-aggregated columns in an aggregate query.
#[must_use]
pub fn count_statement(mut query: SelectStatement, expression: &str) -> SelectStatement {
    query
        .clear_selects()
        .reset_limit()
        .reset_offset()
        .clear_order_by();
    query.expr_as(
        SimpleExpr::Custom(format!("COUNT({expression})")),
        Alias::new(COUNT_ALIAS),
    );
    query
}

/// Run a count statement and read the aggregate back as an unsigned integer.
pub(crate) async fn read_count<C>(db: &C, query: &SelectStatement) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let statement = db.get_database_backend().build(query);
    let row = db
        .query_one(statement)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("Count query returned no row".to_string()))?;
    let count: i64 = row.try_get("", COUNT_ALIAS)?;
    u64::try_from(count).map_err(|_| DbErr::Custom(format!("Count query returned {count}")))
}
