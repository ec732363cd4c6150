use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{
        ParkingSession, PaymentStatus, SessionClose, SessionStatus, SessionWithLocation,
        VehicleClass,
    },
    error::{AppError, Result},
    repository::SessionRepository,
};

#[derive(FromRow)]
struct SessionRow {
    id: String,
    parking_space_id: String,
    user_id: String,
    vehicle_type: String,
    vehicle_number: String,
    check_in_time: NaiveDateTime,
    check_out_time: Option<NaiveDateTime>,
    duration_minutes: Option<i64>,
    amount_charged: Option<f64>,
    payment_status: String,
    qr_code: String,
    status: String,
}

#[derive(FromRow)]
struct SessionLocationRow {
    #[sqlx(flatten)]
    session: SessionRow,
    address: String,
    city: String,
}

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: SessionRow) -> Result<ParkingSession> {
        Ok(ParkingSession {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            parking_space_id: Uuid::parse_str(&row.parking_space_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            vehicle_type: VehicleClass::from_str(&row.vehicle_type).ok_or_else(|| {
                AppError::Database(format!("Invalid vehicle type: {}", row.vehicle_type))
            })?,
            vehicle_number: row.vehicle_number,
            check_in_time: DateTime::from_naive_utc_and_offset(row.check_in_time, Utc),
            check_out_time: row
                .check_out_time
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            duration_minutes: row.duration_minutes,
            amount_charged: row.amount_charged,
            payment_status: PaymentStatus::from_str(&row.payment_status).ok_or_else(|| {
                AppError::Database(format!("Invalid payment status: {}", row.payment_status))
            })?,
            qr_code: row.qr_code,
            status: SessionStatus::from_str(&row.status).ok_or_else(|| {
                AppError::Database(format!("Invalid session status: {}", row.status))
            })?,
        })
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: ParkingSession) -> Result<ParkingSession> {
        let id_str = session.id.to_string();

        sqlx::query(
            r#"
            INSERT INTO parking_sessions (
                id, parking_space_id, user_id, vehicle_type, vehicle_number,
                check_in_time, payment_status, qr_code, status
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(session.parking_space_id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.vehicle_type.as_str())
        .bind(&session.vehicle_number)
        .bind(session.check_in_time.naive_utc())
        .bind(session.payment_status.as_str())
        .bind(&session.qr_code)
        .bind(session.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(session.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created session".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSession>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, parking_space_id, user_id, vehicle_type, vehicle_number,
                   check_in_time, check_out_time, duration_minutes,
                   amount_charged, payment_status, qr_code, status
            FROM parking_sessions
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_session(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SessionWithLocation>> {
        let user_id_str = user_id.to_string();
        let rows = sqlx::query_as::<_, SessionLocationRow>(
            r#"
            SELECT s.id, s.parking_space_id, s.user_id, s.vehicle_type,
                   s.vehicle_number, s.check_in_time, s.check_out_time,
                   s.duration_minutes, s.amount_charged, s.payment_status,
                   s.qr_code, s.status, p.address, p.city
            FROM parking_sessions s
            JOIN parking_spaces p ON s.parking_space_id = p.id
            WHERE s.user_id = ?
            ORDER BY s.check_in_time DESC
            "#,
        )
        .bind(user_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|r| {
                Ok(SessionWithLocation {
                    session: Self::row_to_session(r.session)?,
                    address: r.address,
                    city: r.city,
                })
            })
            .collect()
    }

    async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<ParkingSession>> {
        let space_id_str = space_id.to_string();
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, parking_space_id, user_id, vehicle_type, vehicle_number,
                   check_in_time, check_out_time, duration_minutes,
                   amount_charged, payment_status, qr_code, status
            FROM parking_sessions
            WHERE parking_space_id = ?
            "#,
        )
        .bind(space_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_session).collect()
    }

    async fn complete(&self, id: Uuid, close: SessionClose) -> Result<bool> {
        let id_str = id.to_string();

        // Guarded on status so a second close is a no-op; the active ->
        // completed transition happens at most once.
        let result = sqlx::query(
            r#"
            UPDATE parking_sessions
            SET check_out_time = ?, duration_minutes = ?, amount_charged = ?,
                status = 'completed'
            WHERE id = ? AND status = 'active'
            "#,
        )
        .bind(close.check_out_time.naive_utc())
        .bind(close.duration_minutes)
        .bind(close.amount_charged)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_payment_status(&self, id: Uuid, status: PaymentStatus) -> Result<()> {
        let id_str = id.to_string();

        sqlx::query("UPDATE parking_sessions SET payment_status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
