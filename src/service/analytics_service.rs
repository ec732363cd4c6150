use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::SessionStatus,
    error::Result,
    repository::{SessionRepository, SpaceRepository},
};

/// Revenue summary for one of an owner's spaces, recomputed from the
/// session history on every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    pub space_id: Uuid,
    pub address: String,
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_revenue: f64,
    pub average_session_price: f64,
}

pub struct AnalyticsService {
    spaces: Arc<dyn SpaceRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl AnalyticsService {
    pub fn new(spaces: Arc<dyn SpaceRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { spaces, sessions }
    }

    pub async fn summarize_owner(&self, owner_email: &str) -> Result<Vec<SpaceSummary>> {
        let spaces = self.spaces.list_by_owner(owner_email).await?;

        let mut summaries = Vec::with_capacity(spaces.len());
        for space in spaces {
            let sessions = self.sessions.list_by_space(space.id).await?;
            let total_sessions = sessions.len();

            let completed: Vec<_> = sessions
                .iter()
                .filter(|s| s.status == SessionStatus::Completed)
                .collect();
            let total_revenue: f64 = completed
                .iter()
                .map(|s| s.amount_charged.unwrap_or(0.0))
                .sum();
            let average_session_price = if completed.is_empty() {
                0.0
            } else {
                total_revenue / completed.len() as f64
            };

            summaries.push(SpaceSummary {
                space_id: space.id,
                address: space.address,
                total_sessions,
                completed_sessions: completed.len(),
                total_revenue,
                average_session_price,
            });
        }

        Ok(summaries)
    }
}
