use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Payments are recorded as completed; a session's payment_status starts
/// out pending and flips when the payment lands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub session_id: Uuid,
    pub user_id: Uuid,
    /// Accepted for wire compatibility; the server derives the amount from
    /// the session's stored charge.
    #[serde(default)]
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
}
