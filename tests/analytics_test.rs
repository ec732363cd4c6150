use std::sync::Arc;

use kerbside::{
    db,
    domain::{
        CheckInRequest, CreateSpaceRequest, CreateUserRequest, RecordPaymentRequest, VehicleClass,
    },
    error::AppError,
    repository::{
        SpaceRepository, SqlitePaymentRepository, SqliteSessionRepository, SqliteSpaceRepository,
        SqliteUserRepository, UserRepository,
    },
    service::{AnalyticsService, PaymentService, SessionService},
};
use sqlx::SqlitePool;

struct Fixture {
    spaces: Arc<SqliteSpaceRepository>,
    users: Arc<SqliteUserRepository>,
    sessions_service: SessionService,
    payments_service: PaymentService,
    analytics: AnalyticsService,
}

async fn setup() -> anyhow::Result<Fixture> {
    let pool = SqlitePool::connect(":memory:").await?;
    db::init_schema(&pool).await?;

    let spaces = Arc::new(SqliteSpaceRepository::new(pool.clone()));
    let sessions = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let payments = Arc::new(SqlitePaymentRepository::new(pool.clone()));
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));

    Ok(Fixture {
        spaces: spaces.clone(),
        users,
        sessions_service: SessionService::new(spaces.clone(), sessions.clone()),
        payments_service: PaymentService::new(payments, sessions.clone()),
        analytics: AnalyticsService::new(spaces, sessions),
    })
}

fn space_for(owner_email: &str, car_spots: i64) -> CreateSpaceRequest {
    CreateSpaceRequest {
        owner_name: "Owner".to_string(),
        owner_email: owner_email.to_string(),
        owner_phone: "9876543210".to_string(),
        address: "7 Lake View".to_string(),
        city: "Pune".to_string(),
        space_type: "commercial".to_string(),
        car_spots,
        bike_spots: 0,
        ev_spots: 0,
        description: None,
    }
}

#[tokio::test]
async fn test_owner_with_no_completed_sessions_has_zero_revenue() -> anyhow::Result<()> {
    let fx = setup().await?;
    fx.spaces.create(space_for("idle@example.com", 2)).await?;

    let summaries = fx.analytics.summarize_owner("idle@example.com").await?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_sessions, 0);
    assert_eq!(summaries[0].completed_sessions, 0);
    assert_eq!(summaries[0].total_revenue, 0.0);
    // No division-by-zero: the average is simply zero.
    assert_eq!(summaries[0].average_session_price, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_revenue_sums_completed_sessions_only() -> anyhow::Result<()> {
    let fx = setup().await?;
    let space = fx.spaces.create(space_for("busy@example.com", 3)).await?;

    let user = fx
        .users
        .create(CreateUserRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9000000001".to_string(),
            vehicle_type: VehicleClass::Car,
            vehicle_number: "MH12XY0001".to_string(),
        })
        .await?;

    // Two sessions closed immediately: each bills the one-hour minimum at
    // the default car rate of 20. A third stays active.
    for plate in ["MH12XY0001", "MH12XY0002"] {
        let session = fx
            .sessions_service
            .check_in(CheckInRequest {
                parking_space_id: space.id,
                user_id: user.id,
                vehicle_type: VehicleClass::Car,
                vehicle_number: plate.to_string(),
            })
            .await?;
        fx.sessions_service.check_out(session.id).await?;
    }
    fx.sessions_service
        .check_in(CheckInRequest {
            parking_space_id: space.id,
            user_id: user.id,
            vehicle_type: VehicleClass::Car,
            vehicle_number: "MH12XY0003".to_string(),
        })
        .await?;

    let summaries = fx.analytics.summarize_owner("busy@example.com").await?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_sessions, 3);
    assert_eq!(summaries[0].completed_sessions, 2);
    assert_eq!(summaries[0].total_revenue, 40.0);
    assert_eq!(summaries[0].average_session_price, 20.0);

    Ok(())
}

#[tokio::test]
async fn test_payment_amount_comes_from_the_session() -> anyhow::Result<()> {
    let fx = setup().await?;
    let space = fx.spaces.create(space_for("payee@example.com", 1)).await?;
    let user = fx
        .users
        .create(CreateUserRequest {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            phone: "9000000002".to_string(),
            vehicle_type: VehicleClass::Car,
            vehicle_number: "MH14AB0042".to_string(),
        })
        .await?;

    let session = fx
        .sessions_service
        .check_in(CheckInRequest {
            parking_space_id: space.id,
            user_id: user.id,
            vehicle_type: VehicleClass::Car,
            vehicle_number: "MH14AB0042".to_string(),
        })
        .await?;

    // Paying before check-out is rejected: there is no charge yet.
    let err = fx
        .payments_service
        .record(RecordPaymentRequest {
            session_id: session.id,
            user_id: user.id,
            amount: Some(5.0),
            payment_method: Some("upi".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let summary = fx.sessions_service.check_out(session.id).await?;

    // A lowballed client amount is ignored; the stored charge wins.
    let payment = fx
        .payments_service
        .record(RecordPaymentRequest {
            session_id: session.id,
            user_id: user.id,
            amount: Some(0.01),
            payment_method: Some("upi".to_string()),
        })
        .await?;
    assert_eq!(payment.amount, summary.amount_charged);

    Ok(())
}
