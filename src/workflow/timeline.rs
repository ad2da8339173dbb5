use crate::domain::OrderStatus;

/// Happy-path progression shown on the order timeline, with step labels.
pub const TIMELINE_STEPS: [(OrderStatus, &str); 6] = [
    (OrderStatus::Pending, "Pending"),
    (OrderStatus::Confirmed, "Confirmed"),
    (OrderStatus::Preparing, "Preparing"),
    (OrderStatus::ReadyForPickup, "Ready"),
    (OrderStatus::OutForDelivery, "On Delivery"),
    (OrderStatus::Delivered, "Delivered"),
];

pub const CANCELLED_BANNER: &str = "This order has been cancelled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub state: StepState,
}

/// Render model for the order progress widget.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusTimeline {
    /// Cancelled orders show a single banner and no progression.
    Cancelled { message: &'static str },
    Steps(Vec<TimelineStep>),
}

impl StatusTimeline {
    pub fn for_status(status: &OrderStatus) -> Self {
        if *status == OrderStatus::Cancelled {
            return StatusTimeline::Cancelled { message: CANCELLED_BANNER };
        }

        // Statuses off the progression have no position, so every step is upcoming.
        let current = TIMELINE_STEPS.iter().position(|(step, _)| step == status);

        let steps = TIMELINE_STEPS
            .iter()
            .enumerate()
            .map(|(index, (step, label))| TimelineStep {
                status: step.clone(),
                label: *label,
                state: classify(index, current),
            })
            .collect();

        StatusTimeline::Steps(steps)
    }

    pub fn steps(&self) -> &[TimelineStep] {
        match self {
            StatusTimeline::Cancelled { .. } => &[],
            StatusTimeline::Steps(steps) => steps,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, StatusTimeline::Cancelled { .. })
    }
}

fn classify(index: usize, current: Option<usize>) -> StepState {
    match current {
        Some(current) if index < current => StepState::Completed,
        Some(current) if index == current => StepState::Current,
        _ => StepState::Upcoming,
    }
}
