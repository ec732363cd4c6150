use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{
        CreateSpaceRequest, ParkingSpace, ReviewWithAuthor, SpaceFilter, UpdateSpaceRequest,
        VehicleClass,
    },
    error::{AppError, Result},
};

const SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub city: Option<String>,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSpaceResponse {
    pub success: bool,
    #[serde(rename = "spaceId")]
    pub space_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SpaceDetailResponse {
    #[serde(flatten)]
    pub space: ParkingSpace,
    pub reviews: Vec<ReviewWithAuthor>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSpaceRequest>,
) -> Result<(StatusCode, Json<CreateSpaceResponse>)> {
    if request.address.trim().is_empty() || request.city.trim().is_empty() {
        return Err(AppError::Validation("Address and city are required".to_string()));
    }
    if request.car_spots < 0 || request.bike_spots < 0 || request.ev_spots < 0 {
        return Err(AppError::Validation("Spot counts cannot be negative".to_string()));
    }
    if request.car_spots + request.bike_spots + request.ev_spots == 0 {
        return Err(AppError::Validation("At least one spot is required".to_string()));
    }

    let space = state.service_context.space_repo.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSpaceResponse {
            success: true,
            space_id: space.id,
            message: "Parking space created successfully".to_string(),
        }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ParkingSpace>>> {
    // An unrecognized vehicle_type value simply applies no class filter,
    // matching the behavior of the search form this serves.
    let filter = SpaceFilter {
        city: params.city,
        vehicle_class: params.vehicle_type.as_deref().and_then(VehicleClass::from_str),
    };

    let spaces = state
        .service_context
        .space_repo
        .search(filter, SEARCH_LIMIT)
        .await?;

    Ok(Json(spaces))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SpaceDetailResponse>> {
    let space = state
        .service_context
        .space_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Parking space not found".to_string()))?;

    let reviews = state.service_context.review_repo.list_for_space(id).await?;

    Ok(Json(SpaceDetailResponse { space, reviews }))
}

#[derive(Debug, Serialize)]
pub struct UpdateSpaceResponse {
    pub success: bool,
    pub message: String,
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSpaceRequest>,
) -> Result<Json<UpdateSpaceResponse>> {
    if request.car_spots < 0 || request.bike_spots < 0 || request.ev_spots < 0 {
        return Err(AppError::Validation("Spot counts cannot be negative".to_string()));
    }

    state.service_context.space_repo.update(id, request).await?;

    Ok(Json(UpdateSpaceResponse {
        success: true,
        message: "Parking space updated successfully".to_string(),
    }))
}
