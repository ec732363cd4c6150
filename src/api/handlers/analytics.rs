use axum::{
    extract::{Path, State},
    Json,
};

use crate::{api::state::AppState, error::Result, service::SpaceSummary};

pub async fn owner_summary(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<SpaceSummary>>> {
    let summaries = state
        .service_context
        .analytics_service
        .summarize_owner(&email)
        .await?;

    Ok(Json(summaries))
}
