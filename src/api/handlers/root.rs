use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Kerbside API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Parking marketplace backend",
        "status": "operational",
        "endpoints": {
            "health": "/api/health",
            "users": "/api/users",
            "spaces": "/api/parking-spaces",
            "sessions": "/api/sessions",
            "payments": "/api/payments",
            "reviews": "/api/reviews",
            "analytics": "/api/analytics"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
