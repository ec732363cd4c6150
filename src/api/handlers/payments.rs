use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Payment, RecordPaymentRequest},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct RecordPaymentResponse {
    pub success: bool,
    #[serde(rename = "paymentId")]
    pub payment_id: Uuid,
    pub amount: f64,
    pub message: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<RecordPaymentResponse>)> {
    let payment = state
        .service_context
        .payment_service
        .record(request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordPaymentResponse {
            success: true,
            payment_id: payment.id,
            amount: payment.amount,
            message: "Payment processed successfully".to_string(),
        }),
    ))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Payment>> {
    let payment = state
        .service_context
        .payment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}
