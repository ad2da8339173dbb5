use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OrderStatus;

/// Represents a customer order as returned by the orders API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub restaurant: Option<RestaurantSummary>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddress>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total: f64,
    #[serde(default, deserialize_with = "super::timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub menu_item_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub item_total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Payload for placing a new order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub user_id: String,
    pub restaurant_id: String,
    pub items: Vec<OrderItem>,
    pub contact_info: ContactInfo,
    pub delivery_address: DeliveryAddress,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

impl Order {
    pub fn new(id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            restaurant_id: None,
            restaurant: None,
            items: Vec::new(),
            contact_info: None,
            delivery_address: None,
            status,
            total: 0.0,
            created_at: None,
        }
    }

    /// `"street city"`, the form the order search matches against.
    pub fn address_line(&self) -> Option<String> {
        self.delivery_address
            .as_ref()
            .map(|address| format!("{} {}", address.street, address.city))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
