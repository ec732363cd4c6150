use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use qrcode::{render::svg, QrCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CheckInRequest, ParkingSession, SessionWithLocation},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    #[serde(rename = "qrCode")]
    pub qr_code: String,
    pub message: String,
}

pub async fn check_in(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<CheckInResponse>)> {
    if request.vehicle_number.trim().is_empty() {
        return Err(AppError::Validation("Vehicle number is required".to_string()));
    }

    let session = state
        .service_context
        .session_service
        .check_in(request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            success: true,
            session_id: session.id,
            qr_code: session.qr_code,
            message: "Check-in successful".to_string(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CheckOutResponse {
    pub success: bool,
    pub duration: i64,
    pub amount: f64,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: f64,
    pub message: String,
}

pub async fn check_out(
    State(state): State<AppState>,
    Json(request): Json<CheckOutRequest>,
) -> Result<Json<CheckOutResponse>> {
    let summary = state
        .service_context
        .session_service
        .check_out(request.session_id)
        .await?;

    Ok(Json(CheckOutResponse {
        success: true,
        duration: summary.duration_minutes,
        amount: summary.amount_charged,
        price_per_hour: summary.price_per_hour,
        message: "Check-out successful".to_string(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ParkingSession>> {
    let session = state
        .service_context
        .session_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}

/// Render the session's display code as an SVG QR image for the gate.
pub async fn qr_image(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse> {
    let session = state
        .service_context
        .session_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    let code = QrCode::new(session.qr_code.as_bytes())
        .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .build();

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], image))
}

pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SessionWithLocation>>> {
    let sessions = state
        .service_context
        .session_repo
        .list_by_user(user_id)
        .await?;

    Ok(Json(sessions))
}
