use serde::{Deserialize, Serialize};

/// Registration form for a delivery driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDriver {
    pub driver_id: String,
    pub driver_name: String,
    #[serde(default)]
    pub driver_address: Option<String>,
    #[serde(default)]
    pub driver_phone: Option<String>,
    #[serde(default = "default_vehicle_type")]
    pub vehicle_type: String,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub working_city: Option<String>,
}

fn default_vehicle_type() -> String {
    "bike".to_string()
}

/// An order handed to a driver, as listed by the replication and driver views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAssignment {
    pub order_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

/// One sample of a customer's location history. Coordinates arrive as strings
/// or numbers depending on the producer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPoint {
    pub latitude: serde_json::Value,
    pub longitude: serde_json::Value,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl LocationPoint {
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat = coordinate(&self.latitude)?;
        let lng = coordinate(&self.longitude)?;
        Some(Coordinates { lat, lng })
    }
}

fn coordinate(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// The latest valid position in a location history.
pub fn latest_position(history: &[LocationPoint]) -> Option<Coordinates> {
    history.last().and_then(LocationPoint::coordinates)
}
