use crate::actor_framework::Entity;
use crate::api::ApiCall;
use crate::domain::{DateRange, Payment, PaymentConfirmation, PaymentIntentRequest};
use crate::error::ApiError;

const BASE: [&str; 2] = ["api", "payments"];

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentQuery {
    All,
    Failed,
    Range(DateRange),
    ForCustomer(String),
}

/// Checkout calls; the payments service answers them with intent data rather
/// than payment records.
#[derive(Debug, Clone)]
pub enum PaymentCommand {
    CreateIntent(PaymentIntentRequest),
    Confirm(PaymentConfirmation),
}

fn at(tail: &[&str]) -> Vec<String> {
    BASE.iter().chain(tail).map(|s| s.to_string()).collect()
}

/// Payments are addressed by the order they settle.
impl Entity for Payment {
    type Id = String;
    type CreateParams = ();
    type Patch = ();
    type Query = PaymentQuery;
    type Action = ();
    type Command = PaymentCommand;

    const KIND: &'static str = "payment";

    fn id(&self) -> &String {
        &self.order_id
    }

    fn list_call(query: &PaymentQuery) -> Result<ApiCall, ApiError> {
        let call = match query {
            PaymentQuery::All => ApiCall::get(at(&["admin", "all"])),
            PaymentQuery::Failed => ApiCall::get(at(&["admin", "failed"])),
            PaymentQuery::Range(range) => {
                let mut call = ApiCall::get(at(&["admin", "range"]));
                call.query.extend(range.query("start", "end"));
                call
            }
            PaymentQuery::ForCustomer(email) => ApiCall::get(at(&["user", email.as_str()])),
        };
        Ok(call.payments())
    }

    fn get_call(order_id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::get(at(&[order_id.as_str()])).payments())
    }

    fn command_call(command: &PaymentCommand) -> Result<ApiCall, ApiError> {
        let call = match command {
            PaymentCommand::CreateIntent(request) => {
                ApiCall::post(at(&["create-payment-intent"])).json(request)?
            }
            PaymentCommand::Confirm(confirmation) => ApiCall::post(at(&["confirm"])).json(confirmation)?,
        };
        Ok(call.payments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Service;
    use chrono::NaiveDate;

    #[test]
    fn payment_calls_go_to_payments_service() {
        let call = Payment::get_call(&"o-9".to_string()).unwrap();
        assert_eq!(call.service, Service::Payments);
        assert_eq!(call.path(), "/api/payments/o-9");
    }

    #[test]
    fn range_listing_query() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        );
        let call = Payment::list_call(&PaymentQuery::Range(range)).unwrap();
        assert_eq!(call.path(), "/api/payments/admin/range");
        assert_eq!(call.query_value("start"), Some("2025-02-01"));
        assert_eq!(call.query_value("end"), Some("2025-02-28"));
    }

    #[test]
    fn payments_cannot_be_created_directly() {
        assert!(Payment::create_call(&()).is_err());
    }
}
