use std::cmp::Ordering;

use super::list_view::Criteria;
use crate::domain::{MenuCategory, MenuItem, Order, OrderStatus, Payment, User};

fn contains(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

/// Lower-cased search term, or `None` when the box is empty.
fn needle(search: &str) -> Option<String> {
    (!search.is_empty()).then(|| search.to_lowercase())
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderTab {
    #[default]
    All,
    /// Any known status that is not terminal.
    Active,
    Completed,
    Cancelled,
    Status(OrderStatus),
}

impl OrderTab {
    pub fn includes(&self, status: &OrderStatus) -> bool {
        match self {
            OrderTab::All => true,
            OrderTab::Active => status.is_active(),
            OrderTab::Completed => *status == OrderStatus::Delivered,
            OrderTab::Cancelled => *status == OrderStatus::Cancelled,
            OrderTab::Status(wanted) => status == wanted,
        }
    }
}

impl From<&str> for OrderTab {
    fn from(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "all" => OrderTab::All,
            "active" => OrderTab::Active,
            "completed" => OrderTab::Completed,
            "cancelled" => OrderTab::Cancelled,
            _ => OrderTab::Status(OrderStatus::from(raw.to_ascii_uppercase())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Newest first.
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCriteria {
    pub tab: OrderTab,
    pub search: String,
    pub sort: SortDirection,
}

impl Criteria<Order> for OrderCriteria {
    fn matches(&self, order: &Order) -> bool {
        if !self.tab.includes(&order.status) {
            return false;
        }
        let Some(search) = needle(&self.search) else {
            return true;
        };
        contains(&order.id, &search)
            || order.contact_info.as_ref().is_some_and(|contact| {
                contains(&contact.name, &search) || contains(&contact.phone, &search)
            })
            || order
                .restaurant
                .as_ref()
                .is_some_and(|restaurant| contains(&restaurant.name, &search))
            || contains(order.status.as_str(), &search)
            || order.address_line().is_some_and(|line| contains(&line, &search))
    }

    fn compare(&self, a: &Order, b: &Order) -> Option<Ordering> {
        Some(match self.sort {
            SortDirection::Descending => b.created_at.cmp(&a.created_at),
            SortDirection::Ascending => a.created_at.cmp(&b.created_at),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl OrderCounts {
    pub fn of(orders: &[Order]) -> Self {
        Self {
            total: orders.len(),
            active: orders.iter().filter(|o| o.status.is_active()).count(),
            completed: orders.iter().filter(|o| o.status == OrderStatus::Delivered).count(),
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCriteria {
    pub search: String,
    /// With or without the `ROLE_` prefix.
    pub role: Option<String>,
}

impl Criteria<User> for UserCriteria {
    fn matches(&self, user: &User) -> bool {
        if let Some(role) = &self.role {
            if !user.has_role(role) {
                return false;
            }
        }
        let Some(search) = needle(&self.search) else {
            return true;
        };
        contains(&user.username, &search)
            || user.email.as_deref().is_some_and(|email| contains(email, &search))
            || user.phone_number.as_deref().is_some_and(|phone| contains(phone, &search))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
}

impl UserCounts {
    pub fn of(users: &[User]) -> Self {
        let enabled = users.iter().filter(|u| u.enabled).count();
        Self {
            total: users.len(),
            enabled,
            disabled: users.len() - enabled,
        }
    }
}

// =============================================================================
// Menu items
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    All,
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemCriteria {
    pub search: String,
    pub category_id: Option<String>,
    pub availability: Availability,
}

impl Criteria<MenuItem> for MenuItemCriteria {
    fn matches(&self, item: &MenuItem) -> bool {
        if let Some(category) = &self.category_id {
            if item.category_id.as_ref() != Some(category) {
                return false;
            }
        }
        let available = match self.availability {
            Availability::All => true,
            Availability::Available => item.available,
            Availability::Unavailable => !item.available,
        };
        if !available {
            return false;
        }
        let Some(search) = needle(&self.search) else {
            return true;
        };
        contains(&item.name, &search)
            || item.description.as_deref().is_some_and(|d| contains(d, &search))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCounts {
    pub total: usize,
    pub available: usize,
}

impl MenuCounts {
    pub fn of(items: &[MenuItem]) -> Self {
        Self {
            total: items.len(),
            available: items.iter().filter(|i| i.available).count(),
        }
    }
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentCriteria {
    pub search: String,
}

impl Criteria<Payment> for PaymentCriteria {
    fn matches(&self, payment: &Payment) -> bool {
        let Some(search) = needle(&self.search) else {
            return true;
        };
        contains(&payment.order_id, &search)
            || payment.customer_email.as_deref().is_some_and(|email| contains(email, &search))
            || contains(payment.reference(), &search)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentCounts {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl PaymentCounts {
    pub fn of(payments: &[Payment]) -> Self {
        let succeeded = payments.iter().filter(|p| p.succeeded()).count();
        Self {
            total: payments.len(),
            succeeded,
            failed: payments.len() - succeeded,
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCriteria {
    pub search: String,
}

impl Criteria<MenuCategory> for CategoryCriteria {
    fn matches(&self, category: &MenuCategory) -> bool {
        needle(&self.search).map_or(true, |search| contains(&category.name, &search))
    }

    fn compare(&self, a: &MenuCategory, b: &MenuCategory) -> Option<Ordering> {
        Some(a.display_order.cmp(&b.display_order))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub total: usize,
    pub active: usize,
}

impl CategoryCounts {
    pub fn of(categories: &[MenuCategory]) -> Self {
        Self {
            total: categories.len(),
            active: categories.iter().filter(|c| c.active).count(),
        }
    }
}
