use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, JsonValue, sea_query::SelectStatement};

use super::{QueryEngine, read_count};
use crate::config::ResultMode;

/// Runs statements on a Sea-ORM connection and returns rows as JSON objects.
///
/// This engine has no object mapping, so the configured [`ResultMode`] does
/// not change the row shape.
#[derive(Clone, Debug)]
pub struct ConnectionEngine<'a, C> {
    db: &'a C,
}

impl<'a, C> ConnectionEngine<'a, C>
where
    C: ConnectionTrait,
{
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a, C> QueryEngine for ConnectionEngine<'a, C>
where
    C: ConnectionTrait + Send + Sync,
{
    type Row = JsonValue;

    async fn fetch_rows(
        &self,
        query: SelectStatement,
        _mode: ResultMode,
    ) -> Result<Vec<JsonValue>, DbErr> {
        let statement = self.db.get_database_backend().build(&query);
        JsonValue::find_by_statement(statement).all(self.db).await
    }

    async fn fetch_count(&self, query: SelectStatement) -> Result<u64, DbErr> {
        read_count(self.db, &query).await
    }
}
