use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Errors returned by request handlers.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed, empty or out-of-enum input
    #[display(fmt = "{}", message)]
    Validation {
        field: Option<String>,
        message: String,
    },

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Uniqueness violation on employee_id, email or (employee_id, date)
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Internal Server Error")]
    Database(sqlx::Error),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Employee not found")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "email", nullable = true)]
    pub field: Option<String>,
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn employee_not_found() -> Self {
        ApiError::NotFound("Employee not found".to_string())
    }

    /// Maps a unique-constraint violation to `Conflict` with the given detail.
    /// A writer that raced past the pre-insert check lands here.
    pub fn on_unique_violation(err: sqlx::Error, detail: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ApiError::Conflict(detail.to_string());
            }
        }
        ApiError::Database(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            error!(error = %e, "Database operation failed");
        }

        let field = match self {
            ApiError::Validation { field, .. } => field.clone(),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ApiError::validation("status", "bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::employee_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("Email already exists".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = ApiError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = ApiError::on_unique_violation(sqlx::Error::PoolClosed, "dup");
        assert!(matches!(err, ApiError::Database(_)));
    }
}
