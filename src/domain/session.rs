use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PaymentStatus, VehicleClass};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSession {
    pub id: Uuid,
    pub parking_space_id: Uuid,
    pub user_id: Uuid,
    pub vehicle_type: VehicleClass,
    pub vehicle_number: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub amount_charged: Option<f64>,
    pub payment_status: PaymentStatus,
    pub qr_code: String,
    pub status: SessionStatus,
}

impl ParkingSession {
    /// Display code shown at the gate, derived deterministically from the
    /// session id.
    pub fn display_code(id: Uuid) -> String {
        format!("PARK-{}", &id.simple().to_string()[..8])
    }
}

/// A session moves from `Active` to `Completed` exactly once; there is no
/// way back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SessionStatus::Active),
            "completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    pub parking_space_id: Uuid,
    pub user_id: Uuid,
    pub vehicle_type: VehicleClass,
    pub vehicle_number: String,
}

/// Values written when a session is closed.
#[derive(Debug, Clone)]
pub struct SessionClose {
    pub check_out_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub amount_charged: f64,
}

/// Result of a successful check-out, echoed back to the client.
#[derive(Debug, Clone)]
pub struct CheckOutSummary {
    pub session_id: Uuid,
    pub duration_minutes: i64,
    pub amount_charged: f64,
    pub price_per_hour: f64,
}

/// A session joined with its space's location, for a user's history view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithLocation {
    #[serde(flatten)]
    pub session: ParkingSession,
    pub address: String,
    pub city: String,
}
