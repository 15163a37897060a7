use gridcrate::{
    ColumnDescriptor, EntityEngine, EntityRow, GridConfig, ResultMode, SortDirection, SortDirective,
};
use sea_orm::sea_query::{Alias, Query};
use serde_json::json;

mod common;
use common::{
    contact_columns, contact_entity as contact, contacts_query, grid_request, setup_test_db,
    with_order, with_search,
};

#[tokio::test]
async fn test_object_mode_hydrates_models() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let engine = EntityEngine::<contact::Entity, _>::new(&db);
    let config = GridConfig::default();
    let request = with_order(
        with_search(grid_request(contact_columns()), "Paris"),
        vec![SortDirective::new(4, SortDirection::Desc)],
    );

    let response = config
        .translate(&engine, contacts_query(), &request)
        .build_response()
        .await
        .unwrap();

    assert_eq!(response.records_filtered, 2);
    let models: Vec<contact::Model> = response
        .data
        .into_iter()
        .filter_map(EntityRow::into_model)
        .collect();
    assert_eq!(
        models,
        vec![
            contact::Model {
                id: 3,
                first_name: "Carol".to_string(),
                last_name: "Brown".to_string(),
                city: "Paris".to_string(),
                age: 45,
            },
            contact::Model {
                id: 1,
                first_name: "Alice".to_string(),
                last_name: "Smith".to_string(),
                city: "Paris".to_string(),
                age: 34,
            },
        ]
    );
}

#[tokio::test]
async fn test_object_rows_serialize_without_wrapper() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let engine = EntityEngine::<contact::Entity, _>::new(&db);
    let config = GridConfig::default();
    let mut request = grid_request(contact_columns());
    request.length = Some(1);
    request.order = vec![SortDirective::new(0, SortDirection::Asc)];

    let response = config
        .translate(&engine, contacts_query(), &request)
        .build_response()
        .await
        .unwrap();
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(
        body["data"],
        json!([{
            "id": 1,
            "first_name": "Alice",
            "last_name": "Smith",
            "city": "Paris",
            "age": 34
        }])
    );
    assert_eq!(body["recordsTotal"], json!(6));
}

#[tokio::test]
async fn test_scalar_mode_returns_projected_columns() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let engine = EntityEngine::<contact::Entity, _>::new(&db);
    let config = GridConfig::new().with_result_mode(ResultMode::Scalar);
    let base = Query::select()
        .columns([Alias::new("first_name"), Alias::new("city")])
        .from(contact::Entity)
        .to_owned();
    let request = with_order(
        with_search(
            grid_request(vec![
                ColumnDescriptor::data("first_name"),
                ColumnDescriptor::data("city"),
            ]),
            "London",
        ),
        vec![SortDirective::new(0, SortDirection::Asc)],
    );

    let rows = config
        .translate(&engine, base, &request)
        .fetch_page()
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![
            EntityRow::Scalar(json!({"first_name": "Bob", "city": "London"})),
            EntityRow::Scalar(json!({"first_name": "Eve", "city": "London"})),
        ]
    );
}

#[tokio::test]
async fn test_object_mode_rejects_partial_projection() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let engine = EntityEngine::<contact::Entity, _>::new(&db);
    let config = GridConfig::default();
    let base = Query::select()
        .column(Alias::new("first_name"))
        .from(contact::Entity)
        .to_owned();
    let request = grid_request(vec![ColumnDescriptor::data("first_name")]);

    let err = config
        .translate(&engine, base, &request)
        .fetch_page()
        .await
        .unwrap_err();
    assert!(matches!(err, gridcrate::GridError::Database { .. }));
}
