use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{Payment, PaymentStatus, RecordPaymentRequest},
    error::{AppError, Result},
    repository::{PaymentRepository, SessionRepository},
};

/// Records payments against completed sessions. The amount is taken from
/// the charge stored on the session at check-out; a client-supplied amount
/// is never trusted.
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { payments, sessions }
    }

    pub async fn record(&self, request: RecordPaymentRequest) -> Result<Payment> {
        let session = self
            .sessions
            .find_by_id(request.session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

        let amount = session.amount_charged.ok_or_else(|| {
            AppError::InvalidState("Session has not been checked out yet".to_string())
        })?;

        let payment = self
            .payments
            .create(Payment {
                id: Uuid::new_v4(),
                session_id: request.session_id,
                user_id: request.user_id,
                amount,
                payment_method: request.payment_method,
                status: PaymentStatus::Completed,
                created_at: Utc::now(),
            })
            .await?;

        self.sessions
            .set_payment_status(request.session_id, PaymentStatus::Completed)
            .await?;

        tracing::info!(payment_id = %payment.id, session_id = %payment.session_id,
            amount, "payment recorded");

        Ok(payment)
    }
}
