use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        CheckInRequest, CheckOutSummary, ParkingSession, PaymentStatus, SessionClose,
        SessionStatus,
    },
    error::{AppError, Result},
    repository::{SessionRepository, SpaceRepository},
    service::billing,
};

/// Owns the session lifecycle: check-in reserves a spot and opens an
/// active session, check-out computes duration and charge, closes the
/// session and releases the spot. Capacity counters are only ever touched
/// through these two operations.
pub struct SessionService {
    spaces: Arc<dyn SpaceRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(spaces: Arc<dyn SpaceRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { spaces, sessions }
    }

    pub async fn check_in(&self, request: CheckInRequest) -> Result<ParkingSession> {
        // Existence first, so a missing space is NotFound rather than
        // CapacityExceeded.
        self.spaces
            .find_by_id(request.parking_space_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parking space not found".to_string()))?;

        let reserved = self
            .spaces
            .reserve_spot(request.parking_space_id, request.vehicle_type)
            .await?;
        if !reserved {
            return Err(AppError::CapacityExceeded(format!(
                "No {} spots available",
                request.vehicle_type
            )));
        }

        let id = Uuid::new_v4();
        let session = ParkingSession {
            id,
            parking_space_id: request.parking_space_id,
            user_id: request.user_id,
            vehicle_type: request.vehicle_type,
            vehicle_number: request.vehicle_number,
            check_in_time: Utc::now(),
            check_out_time: None,
            duration_minutes: None,
            amount_charged: None,
            payment_status: PaymentStatus::Pending,
            qr_code: ParkingSession::display_code(id),
            status: SessionStatus::Active,
        };

        match self.sessions.create(session).await {
            Ok(created) => {
                tracing::info!(session_id = %created.id, space_id = %created.parking_space_id,
                    "checked in {} {}", created.vehicle_type, created.vehicle_number);
                Ok(created)
            }
            Err(e) => {
                // Put the spot back if the session row never landed.
                if let Err(release_err) = self
                    .spaces
                    .release_spot(request.parking_space_id, request.vehicle_type)
                    .await
                {
                    tracing::error!("Failed to release spot after check-in error: {}", release_err);
                }
                Err(e)
            }
        }
    }

    pub async fn check_out(&self, session_id: Uuid) -> Result<CheckOutSummary> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

        if session.status != SessionStatus::Active {
            return Err(AppError::InvalidState("Session already completed".to_string()));
        }

        let space = self
            .spaces
            .find_by_id(session.parking_space_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parking space not found".to_string()))?;

        let check_out_time = Utc::now();
        let elapsed_seconds = (check_out_time - session.check_in_time)
            .num_seconds()
            .max(0);
        let duration_minutes = (elapsed_seconds + 59) / 60;

        let price_per_hour = space.rate_for(session.vehicle_type);
        let amount_charged = billing::charge(duration_minutes, price_per_hour);

        let closed = self
            .sessions
            .complete(
                session_id,
                SessionClose {
                    check_out_time,
                    duration_minutes,
                    amount_charged,
                },
            )
            .await?;
        if !closed {
            // Someone else closed it between the read above and now.
            return Err(AppError::InvalidState("Session already completed".to_string()));
        }

        self.spaces
            .release_spot(session.parking_space_id, session.vehicle_type)
            .await?;

        tracing::info!(session_id = %session_id, duration_minutes, amount_charged,
            "checked out");

        Ok(CheckOutSummary {
            session_id,
            duration_minutes,
            amount_charged,
            price_per_hour,
        })
    }
}
