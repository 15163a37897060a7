use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, JsonValue, sea_query::SelectStatement,
};
use serde::Serialize;
use std::marker::PhantomData;

use super::{QueryEngine, read_count};
use crate::config::ResultMode;

/// A row fetched through an [`EntityEngine`].
///
/// Serializes as the model or the raw row itself, without a wrapper.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityRow<M> {
    Model(M),
    Scalar(JsonValue),
}

impl<M> EntityRow<M> {
    /// The hydrated model, if this row was fetched in object mode.
    pub fn into_model(self) -> Option<M> {
        match self {
            Self::Model(model) => Some(model),
            Self::Scalar(_) => None,
        }
    }
}

/// Runs statements on a Sea-ORM connection and maps rows onto entity `E`.
///
/// With [`ResultMode::Object`] every row is hydrated into `E::Model`, so the
/// base query must select the entity's columns (`E::find().into_query()`).
/// With [`ResultMode::Scalar`] rows are returned as JSON objects.
pub struct EntityEngine<'a, E, C> {
    db: &'a C,
    entity: PhantomData<fn() -> E>,
}

impl<'a, E, C> EntityEngine<'a, E, C>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    pub const fn new(db: &'a C) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }
}

#[async_trait]
impl<'a, E, C> QueryEngine for EntityEngine<'a, E, C>
where
    E: EntityTrait,
    E::Model: Serialize,
    C: ConnectionTrait + Send + Sync,
{
    type Row = EntityRow<E::Model>;

    async fn fetch_rows(
        &self,
        query: SelectStatement,
        mode: ResultMode,
    ) -> Result<Vec<Self::Row>, DbErr> {
        let statement = self.db.get_database_backend().build(&query);
        let rows = match mode {
            ResultMode::Object => <E::Model as FromQueryResult>::find_by_statement(statement)
                .all(self.db)
                .await?
                .into_iter()
                .map(EntityRow::Model)
                .collect(),
            ResultMode::Scalar => JsonValue::find_by_statement(statement)
                .all(self.db)
                .await?
                .into_iter()
                .map(EntityRow::Scalar)
                .collect(),
        };
        Ok(rows)
    }

    async fn fetch_count(&self, query: SelectStatement) -> Result<u64, DbErr> {
        read_count(self.db, &query).await
    }
}
