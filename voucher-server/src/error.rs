//! Service-layer error type
//!
//! `ServiceError` lets services use `?` over both `sqlx::Error` and
//! business errors. Database errors are logged and surfaced as
//! `InternalError`; business errors pass through unchanged.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(BoxError),
    /// Business-rule error with its final ErrorCode
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Map a PostgreSQL unique violation (SQLSTATE 23505) to `code`.
pub fn on_unique(code: ErrorCode) -> impl FnOnce(sqlx::Error) -> ServiceError {
    move |e| {
        if let sqlx::Error::Database(db) = &e
            && db.is_unique_violation()
        {
            return AppError::new(code).into();
        }
        e.into()
    }
}

/// Map a PostgreSQL foreign-key violation (SQLSTATE 23503) to `err`.
pub fn on_foreign_key(err: AppError) -> impl FnOnce(sqlx::Error) -> ServiceError {
    move |e| {
        if let sqlx::Error::Database(db) = &e
            && db.is_foreign_key_violation()
        {
            return err.into();
        }
        e.into()
    }
}

/// Turn `validator` failures into a `ValidationFailed` error listing the
/// offending fields.
pub fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
        .with_detail("fields", fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3))]
        username: String,
        #[validate(length(min = 8))]
        password: String,
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let sample = Sample {
            username: "ab".into(),
            password: "short".into(),
        };
        let err = validation_error(sample.validate().unwrap_err());
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid fields: password, username");
    }

    #[test]
    fn test_non_database_errors_stay_internal() {
        let err = on_unique(ErrorCode::VoucherCodeExists)(sqlx::Error::RowNotFound);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_app_errors_pass_through() {
        let err: ServiceError = AppError::new(ErrorCode::VoucherSoldOut).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::VoucherSoldOut);
    }
}
