use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateSpaceRequest, ParkingSpace, SpaceFilter, UpdateSpaceRequest, VehicleClass},
    error::{AppError, Result},
    repository::SpaceRepository,
};

const SPACE_COLUMNS: &str = r#"
    id, owner_name, owner_email, owner_phone, address, city, space_type,
    total_spots, available_spots, car_spots, bike_spots, ev_spots,
    car_price_per_hour, bike_price_per_hour, ev_price_per_hour,
    description, is_active, created_at
"#;

#[derive(FromRow)]
struct SpaceRow {
    id: String,
    owner_name: String,
    owner_email: String,
    owner_phone: String,
    address: String,
    city: String,
    space_type: String,
    total_spots: i64,
    available_spots: i64,
    car_spots: i64,
    bike_spots: i64,
    ev_spots: i64,
    car_price_per_hour: f64,
    bike_price_per_hour: f64,
    ev_price_per_hour: f64,
    description: Option<String>,
    is_active: bool,
    created_at: NaiveDateTime,
}

pub struct SqliteSpaceRepository {
    pool: SqlitePool,
}

impl SqliteSpaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_space(row: SpaceRow) -> Result<ParkingSpace> {
        Ok(ParkingSpace {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            owner_name: row.owner_name,
            owner_email: row.owner_email,
            owner_phone: row.owner_phone,
            address: row.address,
            city: row.city,
            space_type: row.space_type,
            total_spots: row.total_spots,
            available_spots: row.available_spots,
            car_spots: row.car_spots,
            bike_spots: row.bike_spots,
            ev_spots: row.ev_spots,
            car_price_per_hour: row.car_price_per_hour,
            bike_price_per_hour: row.bike_price_per_hour,
            ev_price_per_hour: row.ev_price_per_hour,
            description: row.description,
            is_active: row.is_active,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl SpaceRepository for SqliteSpaceRepository {
    async fn create(&self, space: CreateSpaceRequest) -> Result<ParkingSpace> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let total_spots = space.car_spots + space.bike_spots + space.ev_spots;
        let now = Utc::now().naive_utc();

        // Hourly rates fall back to the schema defaults (20/10/30)
        sqlx::query(
            r#"
            INSERT INTO parking_spaces (
                id, owner_name, owner_email, owner_phone, address, city,
                space_type, total_spots, available_spots, car_spots,
                bike_spots, ev_spots, description, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&space.owner_name)
        .bind(&space.owner_email)
        .bind(&space.owner_phone)
        .bind(&space.address)
        .bind(&space.city)
        .bind(&space.space_type)
        .bind(total_spots)
        .bind(total_spots)
        .bind(space.car_spots)
        .bind(space.bike_spots)
        .bind(space.ev_spots)
        .bind(&space.description)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created space".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpace>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {SPACE_COLUMNS} FROM parking_spaces WHERE id = ?"
        ))
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_space(r)?)),
            None => Ok(None),
        }
    }

    async fn search(&self, filter: SpaceFilter, limit: i64) -> Result<Vec<ParkingSpace>> {
        let mut sql = format!("SELECT {SPACE_COLUMNS} FROM parking_spaces WHERE is_active = 1");

        if filter.city.is_some() {
            sql.push_str(" AND city = ?");
        }
        match filter.vehicle_class {
            Some(VehicleClass::Car) => sql.push_str(" AND car_spots > 0"),
            Some(VehicleClass::Bike) => sql.push_str(" AND bike_spots > 0"),
            Some(VehicleClass::Ev) => sql.push_str(" AND ev_spots > 0"),
            None => {}
        }
        sql.push_str(" LIMIT ?");

        let mut query = sqlx::query_as::<_, SpaceRow>(&sql);
        if let Some(ref city) = filter.city {
            query = query.bind(city.clone());
        }
        query = query.bind(limit);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_space).collect()
    }

    async fn update(&self, id: Uuid, update: UpdateSpaceRequest) -> Result<ParkingSpace> {
        let id_str = id.to_string();
        let total_spots = update.car_spots + update.bike_spots + update.ev_spots;

        let result = sqlx::query(
            r#"
            UPDATE parking_spaces
            SET address = ?, city = ?, description = ?,
                car_spots = ?, bike_spots = ?, ev_spots = ?, total_spots = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.address)
        .bind(&update.city)
        .bind(&update.description)
        .bind(update.car_spots)
        .bind(update.bike_spots)
        .bind(update.ev_spots)
        .bind(total_spots)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Parking space not found".to_string()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated space".to_string()))
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<ParkingSpace>> {
        let rows = sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {SPACE_COLUMNS} FROM parking_spaces WHERE owner_email = ?"
        ))
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_space).collect()
    }

    async fn reserve_spot(&self, id: Uuid, class: VehicleClass) -> Result<bool> {
        let id_str = id.to_string();

        // Single conditional UPDATE, so the capacity check and the
        // decrement cannot interleave with a concurrent check-in.
        let sql = match class {
            VehicleClass::Car => {
                "UPDATE parking_spaces
                 SET car_spots = car_spots - 1, available_spots = available_spots - 1
                 WHERE id = ? AND car_spots > 0"
            }
            VehicleClass::Bike => {
                "UPDATE parking_spaces
                 SET bike_spots = bike_spots - 1, available_spots = available_spots - 1
                 WHERE id = ? AND bike_spots > 0"
            }
            VehicleClass::Ev => {
                "UPDATE parking_spaces
                 SET ev_spots = ev_spots - 1, available_spots = available_spots - 1
                 WHERE id = ? AND ev_spots > 0"
            }
        };

        let result = sqlx::query(sql)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn release_spot(&self, id: Uuid, class: VehicleClass) -> Result<()> {
        let id_str = id.to_string();

        let sql = match class {
            VehicleClass::Car => {
                "UPDATE parking_spaces
                 SET car_spots = car_spots + 1, available_spots = available_spots + 1
                 WHERE id = ?"
            }
            VehicleClass::Bike => {
                "UPDATE parking_spaces
                 SET bike_spots = bike_spots + 1, available_spots = available_spots + 1
                 WHERE id = ?"
            }
            VehicleClass::Ev => {
                "UPDATE parking_spaces
                 SET ev_spots = ev_spots + 1, available_spots = available_spots + 1
                 WHERE id = ?"
            }
        };

        sqlx::query(sql)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
