use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VehicleClass;

/// A listed parking space with per-class availability counters. The
/// counters are touched only by the session lifecycle (check-in reserves,
/// check-out releases), never written directly by handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpace {
    pub id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub address: String,
    pub city: String,
    pub space_type: String,
    pub total_spots: i64,
    pub available_spots: i64,
    pub car_spots: i64,
    pub bike_spots: i64,
    pub ev_spots: i64,
    pub car_price_per_hour: f64,
    pub bike_price_per_hour: f64,
    pub ev_price_per_hour: f64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ParkingSpace {
    /// Remaining spots for a vehicle class.
    pub fn spots_for(&self, class: VehicleClass) -> i64 {
        match class {
            VehicleClass::Car => self.car_spots,
            VehicleClass::Bike => self.bike_spots,
            VehicleClass::Ev => self.ev_spots,
        }
    }

    /// Hourly rate for a vehicle class.
    pub fn rate_for(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Car => self.car_price_per_hour,
            VehicleClass::Bike => self.bike_price_per_hour,
            VehicleClass::Ev => self.ev_price_per_hour,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpaceRequest {
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub address: String,
    pub city: String,
    pub space_type: String,
    pub car_spots: i64,
    pub bike_spots: i64,
    pub ev_spots: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpaceRequest {
    pub address: String,
    pub city: String,
    pub description: Option<String>,
    pub car_spots: i64,
    pub bike_spots: i64,
    pub ev_spots: i64,
}

/// Search filter for the public listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct SpaceFilter {
    pub city: Option<String>,
    pub vehicle_class: Option<VehicleClass>,
}
