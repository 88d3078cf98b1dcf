//! Conversion of domain failures into HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use purchasefx_core::ReconciliationError;
use purchasefx_core::ValidationErrors;
use purchasefx_core::storage::StorageError;
use purchasefx_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Shown for unknown transactions and for conversions without a rate.
pub const CANNOT_CONVERT: &str = "the purchase cannot be converted to the target currency";

/// Error returned by handlers; renders as `{"error", "message", "details"}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Underlying application error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self(AppError::Validation(errors.messages()))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        error!(error = %err, "transaction storage failed");
        Self(AppError::Storage("failed to save the transaction".to_string()))
    }
}

impl From<ReconciliationError> for ApiError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::TransactionNotFound(_)
            | ReconciliationError::NoApplicableRate { .. }
            | ReconciliationError::ConversionOverflow { .. } => {
                warn!(error = %err, "transaction not found or cannot be converted to the target currency");
                Self(AppError::NotFound(CANNOT_CONVERT.to_string()))
            }
            ReconciliationError::Storage(e) => {
                error!(error = %e, "failed to load the transaction");
                Self(AppError::Storage("failed to load the transaction".to_string()))
            }
            ReconciliationError::RateSource(e) => {
                error!(error = %e, "exchange rate retrieval failed");
                Self(AppError::ExternalService(format!(
                    "failed to retrieve exchange rates: {e}"
                )))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "error": self.0.error_code(),
            "message": self.0.message(),
        });
        if !self.0.details().is_empty() {
            body["details"] = json!(self.0.details());
        }

        (status, Json(body)).into_response()
    }
}
