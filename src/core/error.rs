use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for a value longer than its column
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Translate a storage error. Unique violations become conflicts and
    /// over-long values become bad requests; everything else stays a
    /// database error.
    pub fn from_db(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    let constraint = db_err.constraint().unwrap_or("unique constraint");
                    return AppError::Conflict(format!("Duplicate value violates {}", constraint));
                }
                Some(STRING_DATA_RIGHT_TRUNCATION) => {
                    return AppError::BadRequest(db_err.message().to_string());
                }
                _ => {}
            }
        }

        AppError::Database(e)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Conflicts are reported to clients as a plain bad request
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(ref e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(ref msg) => tracing::error!("Internal error: {}", msg),
            ref other => tracing::debug!("Request rejected: {}", other),
        }

        // Error responses carry no body, only the status code
        self.status_code().into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_and_validation_map_to_bad_request() {
        assert_eq!(
            AppError::Conflict("dup".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("title".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            AppError::NotFound("book 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_non_database_sqlx_error_stays_database() {
        let err = AppError::from_db(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Database error carrying a PostgreSQL SQLSTATE
    #[derive(Debug, Error)]
    #[error("SQLSTATE {code}")]
    struct SqlState {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl sqlx::error::DatabaseError for SqlState {
        fn message(&self) -> &str {
            "value rejected by the database"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(std::borrow::Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlState { code, constraint }))
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err = AppError::from_db(db_error(
            UNIQUE_VIOLATION,
            Some("categories_name_unique"),
        ));

        match &err {
            AppError::Conflict(msg) => assert!(msg.contains("categories_name_unique")),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_value_too_long_becomes_bad_request() {
        let err = AppError::from_db(db_error(STRING_DATA_RIGHT_TRUNCATION, None));

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_sqlstate_stays_database() {
        // foreign_key_violation
        let err = AppError::from_db(db_error("23503", None));

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_response_has_empty_body() {
        let response = AppError::NotFound("book 42".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
