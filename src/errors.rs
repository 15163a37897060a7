//! # Error Handling for Grid Requests
//!
//! Two things can go wrong while answering a grid request:
//! - the request itself is malformed (a sort directive pointing past the last
//!   column, a column without the configured field attribute, a field name that
//!   is not a plain identifier)
//! - the database rejects or fails a built query
//!
//! Invalid requests are reported to the client as `400 Bad Request` with the
//! reason. Database errors are logged through `tracing` and answered with a
//! generic `500` message, so that SQL and connection details never reach the
//! client.
//!
//! ```rust,ignore
//! async fn list_users(
//!     State(db): State<DatabaseConnection>,
//!     Json(request): Json<GridRequest>,
//! ) -> Result<Json<GridResponse<serde_json::Value>>, GridError> {
//!     let engine = ConnectionEngine::new(&db);
//!     let response = CONFIG.translate(&engine, users_query(), &request).build_response().await?;
//!     Ok(Json(response))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum GridError {
    /// 400 Bad Request - the grid request violates its contract
    InvalidRequest {
        /// User-facing error message
        message: String,
    },

    /// 500 Internal Server Error - query execution failed (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Error returned by the engine, propagated unchanged
        internal: DbErr,
    },
}

impl GridError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The sanitized message sent to clients.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidRequest { message } | Self::Database { message, .. } => message,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error while answering grid request");
            }
            Self::InvalidRequest { message } => {
                tracing::debug!(error = %message, status = %self.status_code(), "Grid request rejected");
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for GridError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.user_message(),
        });
        (status, body).into_response()
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { message } => write!(f, "invalid grid request: {message}"),
            Self::Database { internal, .. } => write!(f, "query execution failed: {internal}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { internal, .. } => Some(internal),
            Self::InvalidRequest { .. } => None,
        }
    }
}

impl From<DbErr> for GridError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}
