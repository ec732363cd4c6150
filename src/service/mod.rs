pub mod analytics_service;
pub mod billing;
pub mod payment_service;
pub mod session_service;

use std::sync::Arc;

use crate::repository::*;

pub use analytics_service::{AnalyticsService, SpaceSummary};
pub use payment_service::PaymentService;
pub use session_service::SessionService;

pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub space_repo: Arc<dyn SpaceRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub session_service: Arc<SessionService>,
    pub payment_service: Arc<PaymentService>,
    pub analytics_service: Arc<AnalyticsService>,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        space_repo: Arc<dyn SpaceRepository>,
        session_repo: Arc<dyn SessionRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        review_repo: Arc<dyn ReviewRepository>,
    ) -> Self {
        let session_service = Arc::new(SessionService::new(
            space_repo.clone(),
            session_repo.clone(),
        ));
        let payment_service = Arc::new(PaymentService::new(
            payment_repo.clone(),
            session_repo.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            space_repo.clone(),
            session_repo.clone(),
        ));

        Self {
            user_repo,
            space_repo,
            session_repo,
            payment_repo,
            review_repo,
            session_service,
            payment_service,
            analytics_service,
        }
    }
}
