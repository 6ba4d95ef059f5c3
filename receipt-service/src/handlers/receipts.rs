//! Receipt handlers.
//!
//! These adapt HTTP to the store's contract and nothing more; validation
//! lives at the store boundary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{CreateReceipt, ExportFormat, Receipt, ReceiptFilter};
use crate::services::metrics::EXPORTS_TOTAL;
use crate::startup::AppState;

/// List receipts matching the query-string filter.
pub async fn list_receipts(
    State(state): State<AppState>,
    Query(filter): Query<ReceiptFilter>,
) -> Result<Json<Vec<Receipt>>, AppError> {
    let receipts = state.store.list_receipts(&filter).await?;
    Ok(Json(receipts))
}

/// Fetch a single receipt by id.
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Receipt>, AppError> {
    let receipt = state
        .store
        .get_receipt(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Receipt not found")))?;
    Ok(Json(receipt))
}

/// Create a new receipt.
pub async fn create_receipt(
    State(state): State<AppState>,
    Json(payload): Json<CreateReceipt>,
) -> Result<(StatusCode, Json<Receipt>), AppError> {
    tracing::info!(receipt_number = ?payload.receipt_number, "Creating receipt");
    let receipt = state.store.create_receipt(payload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReceiptStatusRequest {
    pub status: String,
}

/// Update a receipt's status (the only mutation besides creation).
pub async fn update_receipt_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReceiptStatusRequest>,
) -> Result<Json<Receipt>, AppError> {
    tracing::info!(receipt_id = %id, new_status = %payload.status, "Updating receipt status");
    let receipt = state
        .store
        .update_receipt_status(id, &payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Receipt not found")))?;
    Ok(Json(receipt))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceiptsRequest {
    pub format: String,
    #[serde(default)]
    pub filters: Option<ReceiptFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceiptsResponse {
    pub message: String,
    pub count: usize,
    pub format: ExportFormat,
}

/// Acknowledge an export request with the count of matching receipts.
///
/// No file is produced; generation and delivery belong to a component that
/// does not exist in this service.
pub async fn export_receipts(
    State(state): State<AppState>,
    Json(payload): Json<ExportReceiptsRequest>,
) -> Result<Json<ExportReceiptsResponse>, AppError> {
    let format = payload
        .format
        .parse::<ExportFormat>()
        .map_err(AppError::BadRequest)?;
    let filter = payload.filters.unwrap_or_default();

    let receipts = state.store.list_receipts(&filter).await?;
    let count = receipts.len();

    EXPORTS_TOTAL.with_label_values(&[format.as_str()]).inc();
    tracing::info!(count, format = %format, "Export requested");

    Ok(Json(ExportReceiptsResponse {
        message: format!("Export of {} receipts in {} format initiated", count, format),
        count,
        format,
    }))
}
