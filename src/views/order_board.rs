use std::num::NonZeroUsize;
use tracing::debug;

use super::criteria::{OrderCounts, OrderCriteria};
use super::list_view::ListView;
use crate::controls::{actions_for, StatusAction, StatusChange};
use crate::domain::Order;
use crate::workflow::StatusTimeline;

/// Render model of the order detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    pub timeline: StatusTimeline,
    pub actions: Vec<StatusAction>,
}

impl OrderDetail {
    pub fn for_order(order: Order) -> Self {
        Self {
            timeline: StatusTimeline::for_status(&order.status),
            actions: actions_for(&order.status),
            order,
        }
    }
}

/// The order-management view: the filtered order list, the order open in the
/// detail modal, and the summary counts.
#[derive(Debug, Clone)]
pub struct OrderBoard {
    list: ListView<Order, OrderCriteria>,
    selected: Option<String>,
    counts: OrderCounts,
}

impl OrderBoard {
    pub fn new(orders: Vec<Order>, page_size: NonZeroUsize) -> Self {
        let counts = OrderCounts::of(&orders);
        Self {
            list: ListView::new(orders, OrderCriteria::default(), page_size),
            selected: None,
            counts,
        }
    }

    pub fn list(&self) -> &ListView<Order, OrderCriteria> {
        &self.list
    }

    pub fn counts(&self) -> OrderCounts {
        self.counts
    }

    pub fn replace_orders(&mut self, orders: Vec<Order>) {
        self.counts = OrderCounts::of(&orders);
        self.list.replace_items(orders);
        if let Some(id) = &self.selected {
            if !self.list.items().iter().any(|order| &order.id == id) {
                self.selected = None;
            }
        }
    }

    pub fn update_criteria(&mut self, update: impl FnOnce(&mut OrderCriteria)) {
        self.list.update_criteria(update);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    /// Opens the detail modal for `order_id`.
    pub fn select(&mut self, order_id: &str) -> Option<OrderDetail> {
        let order = self.list.items().iter().find(|order| order.id == order_id)?.clone();
        self.selected = Some(order.id.clone());
        Some(OrderDetail::for_order(order))
    }

    pub fn selected(&self) -> Option<OrderDetail> {
        let id = self.selected.as_ref()?;
        self.list
            .items()
            .iter()
            .find(|order| &order.id == id)
            .cloned()
            .map(OrderDetail::for_order)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Reflects a status change the backend accepted. Returns false when the
    /// order is not on the board.
    pub fn apply_status_change(&mut self, change: &StatusChange) -> bool {
        let changed = self.list.patch(
            |order| order.id == change.order_id,
            |order| order.status = change.status.clone(),
        );
        self.counts = OrderCounts::of(self.list.items());
        debug!(order_id = %change.order_id, status = %change.status, changed, "Applied status change");
        changed > 0
    }
}
