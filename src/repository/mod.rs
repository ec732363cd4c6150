use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod payment_repository;
pub mod review_repository;
pub mod session_repository;
pub mod space_repository;
pub mod user_repository;

pub use payment_repository::SqlitePaymentRepository;
pub use review_repository::SqliteReviewRepository;
pub use session_repository::SqliteSessionRepository;
pub use space_repository::SqliteSpaceRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: CreateUserRequest) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn create(&self, space: CreateSpaceRequest) -> Result<ParkingSpace>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpace>>;
    async fn search(&self, filter: SpaceFilter, limit: i64) -> Result<Vec<ParkingSpace>>;
    async fn update(&self, id: Uuid, update: UpdateSpaceRequest) -> Result<ParkingSpace>;
    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<ParkingSpace>>;
    /// Atomically take one spot of the given class. Returns false when the
    /// class counter is already at zero; the counters are untouched then.
    async fn reserve_spot(&self, id: Uuid, class: VehicleClass) -> Result<bool>;
    /// Give one spot of the given class back, symmetric with reserve_spot.
    async fn release_spot(&self, id: Uuid, class: VehicleClass) -> Result<()>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: ParkingSession) -> Result<ParkingSession>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSession>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SessionWithLocation>>;
    async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<ParkingSession>>;
    /// Close an active session. Returns false when the session was not in
    /// the active state, in which case nothing was written.
    async fn complete(&self, id: Uuid, close: SessionClose) -> Result<bool>;
    async fn set_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<()>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: Payment) -> Result<Payment>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: Review) -> Result<Review>;
    async fn list_for_space(&self, space_id: Uuid) -> Result<Vec<ReviewWithAuthor>>;
}
