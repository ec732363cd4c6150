use serde::{Deserialize, Serialize};

/// The three vehicle classes a space tracks capacity and pricing for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Bike,
    Ev,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Bike => "bike",
            VehicleClass::Ev => "ev",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "car" => Some(VehicleClass::Car),
            "bike" => Some(VehicleClass::Bike),
            "ev" => Some(VehicleClass::Ev),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
