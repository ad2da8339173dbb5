use serde::{Deserialize, Serialize};

/// A restaurant as listed by the restaurant service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
    #[serde(default)]
    pub cuisine_type_ids: Vec<String>,
    #[serde(default)]
    pub admin_ids: Vec<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_ratings: u32,
}

/// Opening time for one weekday; `day_of_week` runs 1 (Monday) to 7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub day_of_week: u8,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl Restaurant {
    /// `4.3 (12)`, or `no ratings` before the first one.
    pub fn rating_label(&self) -> String {
        if self.total_ratings == 0 {
            "no ratings".to_string()
        } else {
            format!("{:.1} ({})", self.avg_rating, self.total_ratings)
        }
    }

    pub fn is_managed_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id) || self.admin_ids.iter().any(|id| id == user_id)
    }
}
