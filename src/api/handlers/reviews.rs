use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CreateReviewRequest, Review, ReviewWithAuthor},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct CreateReviewResponse {
    pub success: bool,
    #[serde(rename = "reviewId")]
    pub review_id: Uuid,
    pub message: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreateReviewResponse>)> {
    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    state
        .service_context
        .space_repo
        .find_by_id(request.parking_space_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Parking space not found".to_string()))?;

    let review = state
        .service_context
        .review_repo
        .create(Review {
            id: Uuid::new_v4(),
            parking_space_id: request.parking_space_id,
            user_id: request.user_id,
            rating: request.rating,
            comment: request.comment,
            created_at: Utc::now(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            success: true,
            review_id: review.id,
            message: "Review added successfully".to_string(),
        }),
    ))
}

pub async fn list_for_space(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewWithAuthor>>> {
    let reviews = state.service_context.review_repo.list_for_space(id).await?;

    Ok(Json(reviews))
}
