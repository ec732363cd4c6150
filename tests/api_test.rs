use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use kerbside::{api, config::Settings, db, repository, service::ServiceContext};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt;

async fn test_app() -> anyhow::Result<Router> {
    let pool = SqlitePool::connect(":memory:").await?;
    db::init_schema(&pool).await?;

    let service_context = Arc::new(ServiceContext::new(
        Arc::new(repository::SqliteUserRepository::new(pool.clone())),
        Arc::new(repository::SqliteSpaceRepository::new(pool.clone())),
        Arc::new(repository::SqliteSessionRepository::new(pool.clone())),
        Arc::new(repository::SqlitePaymentRepository::new(pool.clone())),
        Arc::new(repository::SqliteReviewRepository::new(pool)),
    ));

    Ok(api::create_app(
        service_context,
        Arc::new(Settings::default()),
    ))
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => Request::builder().method(method).uri(uri).body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

#[tokio::test]
async fn test_health_endpoint() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send_json(&app, "GET", "/api/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    Ok(())
}

#[tokio::test]
async fn test_register_validates_and_conflicts() -> anyhow::Result<()> {
    let app = test_app().await?;

    let user = json!({
        "name": "Asha",
        "email": "asha@example.com",
        "phone": "9000000000",
        "vehicle_type": "car",
        "vehicle_number": "MH01AB1234"
    });

    let (status, body) = send_json(&app, "POST", "/api/users/register", Some(user.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["userId"].is_string());

    // Same email again is a conflict.
    let (status, _) = send_json(&app, "POST", "/api/users/register", Some(user)).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Missing '@' in the email is a validation failure.
    let bad = json!({
        "name": "Bad",
        "email": "not-an-email",
        "phone": "9000000001",
        "vehicle_type": "bike",
        "vehicle_number": "MH01AB9999"
    });
    let (status, _) = send_json(&app, "POST", "/api/users/register", Some(bad)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_full_parking_flow_over_http() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (_, user) = send_json(
        &app,
        "POST",
        "/api/users/register",
        Some(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "9000000010",
            "vehicle_type": "car",
            "vehicle_number": "MH12XY0001"
        })),
    )
    .await?;
    let user_id = user["userId"].as_str().unwrap().to_string();

    let (status, space) = send_json(
        &app,
        "POST",
        "/api/parking-spaces",
        Some(json!({
            "owner_name": "Priya",
            "owner_email": "priya@example.com",
            "owner_phone": "9876543210",
            "address": "12 Hill Road",
            "city": "Mumbai",
            "space_type": "residential",
            "car_spots": 1,
            "bike_spots": 0,
            "ev_spots": 0
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let space_id = space["spaceId"].as_str().unwrap().to_string();

    // Listing filtered by city finds it.
    let (status, listed) =
        send_json(&app, "GET", "/api/parking-spaces?city=Mumbai&vehicle_type=car", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, check_in) = send_json(
        &app,
        "POST",
        "/api/sessions/check-in",
        Some(json!({
            "parking_space_id": space_id,
            "user_id": user_id,
            "vehicle_type": "car",
            "vehicle_number": "MH12XY0001"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(check_in["success"], true);
    let session_id = check_in["sessionId"].as_str().unwrap().to_string();
    let qr_code = check_in["qrCode"].as_str().unwrap().to_string();
    assert!(qr_code.starts_with("PARK-"));

    // The only car spot is taken now.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/sessions/check-in",
        Some(json!({
            "parking_space_id": space_id,
            "user_id": user_id,
            "vehicle_type": "car",
            "vehicle_number": "MH12XY0002"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, check_out) = send_json(
        &app,
        "POST",
        "/api/sessions/check-out",
        Some(json!({ "session_id": session_id })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check_out["pricePerHour"], 20.0);
    assert_eq!(check_out["amount"], 20.0);

    // Second check-out is rejected.
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/sessions/check-out",
        Some(json!({ "session_id": session_id })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, payment) = send_json(
        &app,
        "POST",
        "/api/payments",
        Some(json!({
            "session_id": session_id,
            "user_id": user_id,
            "payment_method": "upi"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["amount"], 20.0);

    let (status, review) = send_json(
        &app,
        "POST",
        "/api/reviews",
        Some(json!({
            "parking_space_id": space_id,
            "user_id": user_id,
            "rating": 5,
            "comment": "Smooth exit"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(review["success"], true);

    // Space detail embeds the review with the reviewer's name.
    let (status, detail) =
        send_json(&app, "GET", &format!("/api/parking-spaces/{space_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(detail["reviews"][0]["name"], "Ravi");

    // Owner analytics reflect the completed session.
    let (status, analytics) = send_json(
        &app,
        "GET",
        "/api/analytics/owner/priya@example.com",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics[0]["completedSessions"], 1);
    assert_eq!(analytics[0]["totalRevenue"], 20.0);
    assert_eq!(analytics[0]["averageSessionPrice"], 20.0);

    Ok(())
}

#[tokio::test]
async fn test_review_rating_out_of_range() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/reviews",
        Some(json!({
            "parking_space_id": uuid::Uuid::new_v4(),
            "user_id": uuid::Uuid::new_v4(),
            "rating": 6,
            "comment": null
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_session_qr_is_svg() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (_, user) = send_json(
        &app,
        "POST",
        "/api/users/register",
        Some(json!({
            "name": "Meera",
            "email": "meera@example.com",
            "phone": "9000000020",
            "vehicle_type": "ev",
            "vehicle_number": "MH14EV0042"
        })),
    )
    .await?;
    let (_, space) = send_json(
        &app,
        "POST",
        "/api/parking-spaces",
        Some(json!({
            "owner_name": "Priya",
            "owner_email": "priya@example.com",
            "owner_phone": "9876543210",
            "address": "3 Charging Lane",
            "city": "Pune",
            "space_type": "commercial",
            "car_spots": 0,
            "bike_spots": 0,
            "ev_spots": 1
        })),
    )
    .await?;
    let (_, check_in) = send_json(
        &app,
        "POST",
        "/api/sessions/check-in",
        Some(json!({
            "parking_space_id": space["spaceId"],
            "user_id": user["userId"],
            "vehicle_type": "ev",
            "vehicle_number": "MH14EV0042"
        })),
    )
    .await?;
    let session_id = check_in["sessionId"].as_str().unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/sessions/{session_id}/qr"))
        .body(Body::empty())?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );
    let bytes = response.into_body().collect().await?.to_bytes();
    assert!(std::str::from_utf8(&bytes)?.contains("<svg"));

    Ok(())
}
