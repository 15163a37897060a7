#![allow(dead_code)]

use gridcrate::{ColumnDescriptor, GridRequest, SearchValue, SortDirective};
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, DbErr, EntityTrait, QueryTrait};
use sea_orm_migration::prelude::*;

pub mod contact_entity;

use contact_entity as contact;

/// (id, first name, last name, city, age)
pub const CONTACTS: [(i32, &str, &str, &str, i32); 6] = [
    (1, "Alice", "Smith", "Paris", 34),
    (2, "Bob", "Jones", "London", 28),
    (3, "Carol", "Brown", "Paris", 45),
    (4, "Dave", "Smithers", "Berlin", 31),
    (5, "Eve", "Adams", "London", 22),
    (6, "Frank", "Bobson", "Madrid", 52),
];

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_target(false)
        .compact()
        .try_init();
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    let contacts = CONTACTS
        .iter()
        .map(|(id, first_name, last_name, city, age)| contact::ActiveModel {
            id: Set(*id),
            first_name: Set((*first_name).to_string()),
            last_name: Set((*last_name).to_string()),
            city: Set((*city).to_string()),
            age: Set(*age),
        });
    contact::Entity::insert_many(contacts).exec(&db).await?;

    Ok(db)
}

/// Every contact column, as the base query of the grid.
pub fn contacts_query() -> SelectStatement {
    contact::Entity::find().into_query()
}

/// The five contact columns in table order, all searchable.
pub fn contact_columns() -> Vec<ColumnDescriptor> {
    ["id", "first_name", "last_name", "city", "age"]
        .into_iter()
        .map(ColumnDescriptor::data)
        .collect()
}

pub fn grid_request(columns: Vec<ColumnDescriptor>) -> GridRequest {
    GridRequest {
        draw: serde_json::json!(1),
        columns,
        ..Default::default()
    }
}

pub fn with_search(mut request: GridRequest, value: &str) -> GridRequest {
    request.search = Some(SearchValue::new(value));
    request
}

pub fn with_order(mut request: GridRequest, order: Vec<SortDirective>) -> GridRequest {
    request.order = order;
    request
}

/// Read the `id` of every JSON row.
pub fn ids(rows: &[serde_json::Value]) -> Vec<i64> {
    rows.iter()
        .map(|row| row["id"].as_i64().expect("row has an integer id"))
        .collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateContactTable)]
    }
}

pub struct CreateContactTable;

#[async_trait::async_trait]
impl MigrationName for CreateContactTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_contact_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateContactTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(contact::Entity)
            .if_not_exists()
            .col(
                ColumnDef::new(contact::Column::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(contact::Column::FirstName).string().not_null())
            .col(ColumnDef::new(contact::Column::LastName).string().not_null())
            .col(ColumnDef::new(contact::Column::City).string().not_null())
            .col(ColumnDef::new(contact::Column::Age).integer().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(contact::Entity).to_owned())
            .await?;
        Ok(())
    }
}
