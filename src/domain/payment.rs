use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status string the payments service uses for a settled charge.
pub const PAYMENT_SUCCEEDED: &str = "succeeded";

/// A payment record from the payments service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Option<String>,
    pub order_id: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub payment_status: String,
    #[serde(default)]
    pub stripe_payment_id: Option<String>,
    #[serde(default, deserialize_with = "super::timestamp::lenient")]
    pub payment_date: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn succeeded(&self) -> bool {
        self.payment_status == PAYMENT_SUCCEEDED
    }

    /// Payment reference shown in the table; only settled charges have one.
    pub fn reference(&self) -> &str {
        if self.succeeded() {
            self.stripe_payment_id.as_deref().unwrap_or("")
        } else {
            "n/a"
        }
    }
}

/// Body of `POST /api/payments/create-payment-intent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub customer_email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

/// Body of `POST /api/payments/confirm`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_intent_id: String,
    pub order_id: String,
}

/// Inclusive date window used by the range listing and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The window as two query pairs. The admin listing names them
    /// `start`/`end`, the report endpoint `startDate`/`endDate`.
    pub fn query(&self, start_key: &str, end_key: &str) -> Vec<(String, String)> {
        vec![
            (start_key.to_string(), self.start.format("%Y-%m-%d").to_string()),
            (end_key.to_string(), self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(status: &str) -> Payment {
        Payment {
            id: None,
            order_id: "o1".into(),
            customer_email: Some("a@b.c".into()),
            amount: 12.0,
            currency: None,
            payment_status: status.into(),
            stripe_payment_id: Some("pi_123".into()),
            payment_date: None,
        }
    }

    #[test]
    fn reference_hidden_unless_succeeded() {
        assert_eq!(payment("succeeded").reference(), "pi_123");
        assert_eq!(payment("requires_payment_method").reference(), "n/a");
    }

    #[test]
    fn range_formats_dates() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        assert_eq!(range.query("startDate", "endDate")[1], ("endDate".to_string(), "2025-01-31".to_string()));
    }
}
