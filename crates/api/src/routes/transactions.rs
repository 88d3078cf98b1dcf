//! Purchase transaction routes.
//!
//! - `POST /transactions` records a purchase in the base currency.
//! - `GET /transactions/{id}/{currency}` returns it converted with the rate
//!   that applied at purchase time.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use purchasefx_core::transaction::{validate_amount, validate_description};
use purchasefx_core::{Conversion, Transaction};
use purchasefx_shared::AppError;
use purchasefx_shared::types::{TransactionId, round_to_two_decimal_places};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{AppState, error::ApiError};

/// Timestamp field missing or blank.
pub const TIMESTAMP_REQUIRED: &str = "transaction timestamp is required; it cannot be empty";

/// Timestamp field present but not RFC 3339.
pub const TIMESTAMP_FORMAT: &str = "transaction timestamp format must be in ISO 8601 standard";

/// Response timestamp layout, always UTC.
const RESPONSE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}/{currency}", get(convert_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a purchase.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Free text, at most 50 characters after trimming.
    #[serde(default)]
    pub description: String,
    /// RFC 3339 instant, e.g. `2023-11-06T15:04:05Z`.
    #[serde(default)]
    pub timestamp: String,
    /// Amount in the base currency; number or decimal string.
    #[serde(default, alias = "amount_in_usd")]
    pub amount: Decimal,
}

/// A stored purchase expressed in the target currency.
#[derive(Debug, Serialize)]
pub struct ConvertedTransactionResponse {
    /// Transaction ID.
    pub id: String,
    /// Description.
    pub description: String,
    /// Purchase time, `YYYY-MM-DD HH:MM:SS` in UTC.
    pub timestamp: String,
    /// Amount in the base currency.
    pub amount: String,
    /// Rate used, two decimal places.
    pub exchange_rate: String,
    /// Amount in the target currency.
    pub converted_amount: String,
    /// Currency name as published with the rate.
    pub currency: String,
    /// Day the rate was recorded.
    pub rate_date: String,
}

impl From<&Conversion> for ConvertedTransactionResponse {
    fn from(conversion: &Conversion) -> Self {
        let tx = &conversion.transaction;
        let rate = &conversion.exchange_rate;
        Self {
            id: tx.id().to_string(),
            description: tx.description().to_string(),
            timestamp: tx.timestamp().format(RESPONSE_TIMESTAMP_FORMAT).to_string(),
            amount: money(tx.amount()),
            exchange_rate: money(rate.rate()),
            converted_amount: money(conversion.converted_amount),
            currency: rate.currency_name().to_string(),
            rate_date: rate.date_of_record().to_string(),
        }
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", round_to_two_decimal_places(value))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Record a purchase.
async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "invalid request payload");
        ApiError(AppError::BadRequest("invalid request payload".to_string()))
    })?;

    let transaction = build_transaction(&payload).inspect_err(|e| {
        warn!(errors = ?e.inner().details(), "transaction validation failed");
    })?;

    state.reconciliation.save_transaction(&transaction).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": { "id": transaction.id().to_string() } })),
    ))
}

/// GET `/transactions/{id}/{currency}` - Convert a stored purchase.
async fn convert_transaction(
    State(state): State<AppState>,
    Path((id, currency)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(transaction_id) = id.parse::<TransactionId>() else {
        warn!(id = %id, "invalid transaction ID format");
        return Err(ApiError(AppError::BadRequest(
            "invalid transaction ID format".to_string(),
        )));
    };

    let currency = currency.trim();
    if currency.is_empty() {
        warn!("currency not provided");
        return Err(ApiError(AppError::BadRequest(
            "currency not provided".to_string(),
        )));
    }

    let conversion = state
        .reconciliation
        .find_applicable_rate(transaction_id, currency)
        .await?;

    info!(transaction_id = %transaction_id, currency = %currency, "conversion served");
    Ok(Json(json!({ "data": ConvertedTransactionResponse::from(&conversion) })))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds a transaction from the request.
///
/// An unusable timestamp is reported after any description or amount
/// failures so the caller still gets the full list.
fn build_transaction(payload: &CreateTransactionRequest) -> Result<Transaction, ApiError> {
    match parse_timestamp(&payload.timestamp) {
        Ok(timestamp) => Ok(Transaction::new(
            &payload.description,
            timestamp,
            payload.amount,
        )?),
        Err(timestamp_error) => {
            let mut messages: Vec<String> = [
                validate_description(payload.description.trim()),
                validate_amount(payload.amount),
            ]
            .into_iter()
            .flatten()
            .map(|e| e.to_string())
            .collect();
            messages.push(timestamp_error.to_string());
            Err(ApiError(AppError::Validation(messages)))
        }
    }
}

/// Parses an RFC 3339 timestamp with a literal `T` separator.
///
/// # Errors
///
/// Returns [`TIMESTAMP_REQUIRED`] or [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TIMESTAMP_REQUIRED);
    }
    if raw.as_bytes().get(10) != Some(&b'T') {
        return Err(TIMESTAMP_FORMAT);
    }
    DateTime::parse_from_rfc3339(raw).map_err(|_| TIMESTAMP_FORMAT)
}
