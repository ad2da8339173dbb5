use crate::domain::OrderStatus;

use OrderStatus::*;

const FROM_PENDING: &[OrderStatus] = &[Confirmed, Cancelled];
const FROM_CONFIRMED: &[OrderStatus] = &[Preparing, Cancelled];
const FROM_PREPARING: &[OrderStatus] = &[ReadyForPickup, Cancelled];
const FROM_READY_FOR_PICKUP: &[OrderStatus] = &[OutForDelivery, Delivered, Cancelled];
const FROM_OUT_FOR_DELIVERY: &[OrderStatus] = &[Delivered, Cancelled];
const TERMINAL: &[OrderStatus] = &[];

/// Statuses an order may move to next, in the order they are offered.
///
/// This is a UI hint only; the orders service enforces the real rules and may
/// still reject a listed transition.
pub fn next_statuses(current: &OrderStatus) -> &'static [OrderStatus] {
    match current {
        Pending => FROM_PENDING,
        Confirmed => FROM_CONFIRMED,
        Preparing => FROM_PREPARING,
        ReadyForPickup => FROM_READY_FOR_PICKUP,
        OutForDelivery => FROM_OUT_FOR_DELIVERY,
        Delivered | Cancelled | Unrecognized(_) => TERMINAL,
    }
}

/// Same as [`next_statuses`] for a raw wire value; unknown strings get no transitions.
pub fn next_statuses_for(raw: &str) -> &'static [OrderStatus] {
    next_statuses(&OrderStatus::from(raw))
}

pub fn is_terminal(status: &OrderStatus) -> bool {
    next_statuses(status).is_empty()
}

pub fn can_transition(from: &OrderStatus, to: &OrderStatus) -> bool {
    next_statuses(from).contains(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses_have_no_transitions() {
        assert!(next_statuses(&Delivered).is_empty());
        assert!(next_statuses(&Cancelled).is_empty());
    }

    #[test]
    fn every_live_status_can_be_cancelled() {
        for status in OrderStatus::KNOWN {
            if matches!(status, Delivered | Cancelled) {
                continue;
            }
            assert!(next_statuses(&status).contains(&Cancelled), "{} cannot cancel", status);
        }
    }

    #[test]
    fn unknown_strings_offer_nothing() {
        assert!(next_statuses_for("ON_HOLD").is_empty());
        assert!(next_statuses_for("").is_empty());
        assert!(next_statuses_for("pending").is_empty());
    }

    #[test]
    fn ready_for_pickup_can_skip_delivery_leg() {
        assert_eq!(next_statuses_for("READY_FOR_PICKUP"), &[OutForDelivery, Delivered, Cancelled]);
        assert!(can_transition(&ReadyForPickup, &Delivered));
        assert!(!can_transition(&Pending, &Delivered));
    }

    #[test]
    fn no_status_leads_back_to_pending() {
        for status in OrderStatus::KNOWN {
            assert!(!next_statuses(&status).contains(&Pending));
        }
        assert!(is_terminal(&Unrecognized("LOST".into())));
    }
}
