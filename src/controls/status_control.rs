use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::notify::{Notice, Notifier};
use crate::clients::OrderClient;
use crate::domain::{Order, OrderStatus};
use crate::error::OrderError;
use crate::workflow::next_statuses;

/// Progress of the control's status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// One entry of the control's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAction {
    pub status: OrderStatus,
    pub label: String,
    /// Rendered as a warning (cancellation).
    pub destructive: bool,
}

/// Reported to the listener after the backend accepted a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("{} is not offered from the current status", .0.label())]
    NotOffered(OrderStatus),
    #[error("A status update is already in progress")]
    Busy,
    #[error(transparent)]
    Rejected(#[from] OrderError),
}

/// Render model for the control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    pub order_id: String,
    pub status: OrderStatus,
    pub actions: Vec<StatusAction>,
    pub busy: bool,
    pub state: RequestState,
}

#[derive(Debug)]
struct ControlState {
    status: OrderStatus,
    request: RequestState,
}

/// Offers the allowed next statuses for one order and submits the chosen one.
///
/// At most one request is in flight per control. The displayed status only
/// changes once the backend accepts the update.
pub struct StatusTransitionControl {
    order_id: String,
    state: Mutex<ControlState>,
    client: OrderClient,
    notifier: Arc<dyn Notifier>,
    listener: Option<mpsc::UnboundedSender<StatusChange>>,
}

pub fn actions_for(status: &OrderStatus) -> Vec<StatusAction> {
    next_statuses(status)
        .iter()
        .map(|next| StatusAction {
            status: next.clone(),
            label: next.label(),
            destructive: *next == OrderStatus::Cancelled,
        })
        .collect()
}

impl StatusTransitionControl {
    pub fn new(order: &Order, client: OrderClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            order_id: order.id.clone(),
            state: Mutex::new(ControlState {
                status: order.status.clone(),
                request: RequestState::Idle,
            }),
            client,
            notifier,
            listener: None,
        }
    }

    /// Also report accepted changes on `listener`.
    pub fn with_listener(mut self, listener: mpsc::UnboundedSender<StatusChange>) -> Self {
        self.listener = Some(listener);
        self
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn status(&self) -> OrderStatus {
        self.lock().status.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.lock().request.clone()
    }

    pub fn actions(&self) -> Vec<StatusAction> {
        actions_for(&self.lock().status)
    }

    /// Terminal and unrecognized statuses have nothing to offer.
    pub fn is_visible(&self) -> bool {
        !next_statuses(&self.lock().status).is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().request == RequestState::Pending
    }

    pub fn view(&self) -> ControlView {
        let state = self.lock();
        ControlView {
            order_id: self.order_id.clone(),
            status: state.status.clone(),
            actions: actions_for(&state.status),
            busy: state.request == RequestState::Pending,
            state: state.request.clone(),
        }
    }

    /// Submits `new_status`.
    ///
    /// Fails without sending anything if the status is not currently offered
    /// or another selection is still in flight.
    #[instrument(skip_all, fields(order_id = %self.order_id, status = %new_status))]
    pub async fn select(&self, new_status: OrderStatus) -> Result<StatusChange, ControlError> {
        {
            let mut state = self.lock();
            if !next_statuses(&state.status).contains(&new_status) {
                debug!(current = %state.status, "Status not offered");
                return Err(ControlError::NotOffered(new_status));
            }
            if state.request == RequestState::Pending {
                debug!("Update already in flight");
                return Err(ControlError::Busy);
            }
            state.request = RequestState::Pending;
        }
        let _in_flight = InFlight { state: &self.state };

        match self.client.update_status(self.order_id.clone(), new_status.clone()).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.status = new_status.clone();
                    state.request = RequestState::Succeeded;
                }
                info!("Status updated");
                self.notifier
                    .notify(Notice::success(format!("Order status updated to {}", new_status.label())));

                let change = StatusChange {
                    order_id: self.order_id.clone(),
                    status: new_status,
                };
                if let Some(listener) = &self.listener {
                    if listener.send(change.clone()).is_err() {
                        debug!("Listener gone");
                    }
                }
                Ok(change)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "Status update rejected");
                self.lock().request = RequestState::Failed(message.clone());
                self.notifier.notify(Notice::error(message));
                Err(ControlError::Rejected(e))
            }
        }
    }
}

/// Returns a control to `Idle` when its selection is dropped before the
/// backend answered (task abort, a caller's timeout).
struct InFlight<'a> {
    state: &'a Mutex<ControlState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.request == RequestState::Pending {
            debug!("Status update abandoned");
            state.request = RequestState::Idle;
        }
    }
}
