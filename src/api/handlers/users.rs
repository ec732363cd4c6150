use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CreateUserRequest, User},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub message: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if !request.email.contains('@') {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if request.phone.trim().is_empty() {
        return Err(AppError::Validation("Phone is required".to_string()));
    }
    if request.vehicle_number.trim().is_empty() {
        return Err(AppError::Validation("Vehicle number is required".to_string()));
    }

    let user = state
        .service_context
        .user_repo
        .create(request)
        .await
        .map_err(|e| match e {
            AppError::Database(msg) if msg.contains("UNIQUE") => {
                if msg.contains("email") {
                    AppError::Conflict("Email already registered".to_string())
                } else if msg.contains("vehicle_number") {
                    AppError::Conflict("Vehicle already registered".to_string())
                } else {
                    AppError::Conflict("Registration failed: duplicate information".to_string())
                }
            }
            _ => e,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user_id: user.id,
            message: "User registered successfully".to_string(),
        }),
    ))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<User>> {
    let user = state
        .service_context
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
