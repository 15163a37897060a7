//! # gridcrate
//!
//! Server-side processing for data grids on top of Sea-ORM.
//!
//! A grid sends its paging, sorting and search state as a [`GridRequest`].
//! `gridcrate` applies that state to a base [`SelectStatement`] and answers
//! with a [`GridResponse`] holding one page of rows, the number of rows
//! matching the search (`recordsFiltered`) and the number of rows overall
//! (`recordsTotal`).
//!
//! ```rust,ignore
//! use gridcrate::{ConnectionEngine, GridConfig, GridError, GridRequest, GridResponse};
//! use sea_orm::{EntityTrait, QueryTrait};
//!
//! async fn users_grid(
//!     State(db): State<DatabaseConnection>,
//!     Json(request): Json<GridRequest>,
//! ) -> Result<Json<GridResponse<serde_json::Value>>, GridError> {
//!     let config = GridConfig::new().with_search_delimiter(",");
//!     let engine = ConnectionEngine::new(&db);
//!     let response = config
//!         .translate(&engine, users::Entity::find().into_query(), &request)
//!         .build_response()
//!         .await?;
//!     Ok(Json(response))
//! }
//! ```
//!
//! [`SelectStatement`]: sea_orm::sea_query::SelectStatement

pub mod config;
pub mod engine;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod translator;

pub use config::{FieldSelector, GridConfig, ResultMode};
pub use engine::{ConnectionEngine, EntityEngine, EntityRow, QueryEngine};
pub use errors::GridError;
pub use models::{ColumnDescriptor, GridRequest, GridResponse, SearchValue, SortDirection, SortDirective};
pub use translator::GridQuery;
