use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub parking_space_id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the reviewer's name, as shown on a space's page.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub parking_space_id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
    pub comment: Option<String>,
}
